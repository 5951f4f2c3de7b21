//! ASCII Armor.
//!
//! This module decodes ASCII armored data as defined in [Section 6 of
//! RFC 4880].  Every armor block found in the input is decoded in
//! order.  The text part of cleartext signed messages is skipped, but
//! the signature block that follows it is decoded.
//!
//!   [Section 6 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-6
//!
//! # Examples
//!
//! ```
//! # fn main() -> sequoia_pgpdump::Result<()> {
//! use sequoia_pgpdump::armor;
//!
//! let data = "-----BEGIN PGP MESSAGE-----
//!
//! ygNQR1A=
//! =GG5/
//! -----END PGP MESSAGE-----
//! ";
//! assert!(armor::is_armored(data.as_bytes()));
//! assert_eq!(armor::dearmor(data.as_bytes())?, b"\xca\x03PGP");
//! # Ok(()) }
//! ```

use crate::{Error, Result};

const BEGIN: &[u8] = b"-----BEGIN PGP ";
const END: &[u8] = b"-----END PGP ";

/// Specifies the type of data (see [RFC 4880, section 6.2]).
///
/// [RFC 4880, section 6.2]: https://tools.ietf.org/html/rfc4880#section-6.2
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// A generic OpenPGP message.
    Message,
    /// A certificate.
    PublicKey,
    /// A transferable secret key.
    SecretKey,
    /// A detached signature.
    Signature,
    /// A generic file.  This is a GnuPG extension.
    File,
    /// The cleartext part of a cleartext signed message.
    SignedMessage,
}

impl Kind {
    /// Detects the header returning the kind.
    fn detect(line: &[u8]) -> Option<Self> {
        if ! line.starts_with(BEGIN) {
            return None;
        }
        Self::detect_blurb(&line[BEGIN.len()..])
    }

    /// Detects the footer returning the kind.
    fn detect_footer(line: &[u8]) -> Option<Self> {
        if ! line.starts_with(END) {
            return None;
        }
        Self::detect_blurb(&line[END.len()..])
    }

    fn detect_blurb(kind: &[u8]) -> Option<Self> {
        [Kind::Message, Kind::PublicKey, Kind::SecretKey, Kind::Signature,
         Kind::File, Kind::SignedMessage].iter()
            .find(|k| kind == format!("{}-----", k.blurb()).as_bytes())
            .cloned()
    }

    fn blurb(&self) -> &str {
        match self {
            &Kind::Message => "MESSAGE",
            &Kind::PublicKey => "PUBLIC KEY BLOCK",
            &Kind::SecretKey => "PRIVATE KEY BLOCK",
            &Kind::Signature => "SIGNATURE",
            &Kind::File => "ARMORED FILE",
            &Kind::SignedMessage => "SIGNED MESSAGE",
        }
    }
}

/// A decoded armor block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    kind: Kind,
    headers: Vec<(String, String)>,
    data: Vec<u8>,
}

impl Block {
    /// Returns the kind of data this block contains.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the armor headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the decoded data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the decoded data, consuming the block.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Returns whether `input` looks like ASCII armored data.
///
/// Leading whitespace is skipped.
pub fn is_armored(input: &[u8]) -> bool {
    input.iter()
        .position(|c| ! c.is_ascii_whitespace())
        .map(|start| input[start..].starts_with(b"-----BEGIN PGP"))
        .unwrap_or(false)
}

/// Decodes all armor blocks in `input`, dropping the block
/// boundaries.
pub fn dearmor(input: &[u8]) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    for block in decode_all(input)? {
        data.extend_from_slice(block.data());
    }
    Ok(data)
}

enum State {
    /// Looking for the next armor header line.
    Searching,
    /// Reading armor headers.
    Headers(Kind, Vec<(String, String)>),
    /// Reading the base64 body.
    Body {
        kind: Kind,
        headers: Vec<(String, String)>,
        body: String,
        crc: Option<String>,
    },
}

/// Decodes all armor blocks in `input`.
///
/// Fails if no armor block is found, if a block lacks its footer, if
/// the base64 encoding is invalid, or if the checksum does not match.
pub fn decode_all(input: &[u8]) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut state = State::Searching;

    for (lineno, line) in input.split(|c| *c == b'\n').enumerate() {
        let line = trim_end(line);

        state = match state {
            State::Searching => match Kind::detect(line) {
                Some(Kind::SignedMessage) => {
                    // The cleartext is followed by a signature block.
                    log::debug!("Skipping cleartext at line {}", lineno + 1);
                    State::Searching
                },
                Some(kind) => {
                    log::trace!("Found {:?} armor at line {}",
                                kind, lineno + 1);
                    State::Headers(kind, Vec::new())
                },
                None => State::Searching,
            },

            State::Headers(kind, mut headers) => {
                if line.is_empty() {
                    State::Body { kind, headers, body: String::new(),
                                  crc: None }
                } else if let Some(header) = parse_header(line) {
                    headers.push(header);
                    State::Headers(kind, headers)
                } else {
                    // Be lenient and accept armor without the blank
                    // line separating headers and body.
                    let mut body = String::new();
                    push_body_line(&mut body, line, lineno)?;
                    State::Body { kind, headers, body, crc: None }
                }
            },

            State::Body { kind, headers, mut body, mut crc } => {
                if line.starts_with(END) {
                    if Kind::detect_footer(line) != Some(kind) {
                        return Err(Error::MalformedArmor(format!(
                            "Footer at line {} does not match {:?} header",
                            lineno + 1, kind)).into());
                    }
                    blocks.push(finish(kind, headers, &body, crc)?);
                    State::Searching
                } else if line.first() == Some(&b'=') {
                    crc = Some(String::from_utf8_lossy(&line[1..])
                               .into_owned());
                    State::Body { kind, headers, body, crc }
                } else if crc.is_some() && ! line.is_empty() {
                    return Err(Error::MalformedArmor(format!(
                        "Data after checksum at line {}", lineno + 1))
                               .into());
                } else {
                    push_body_line(&mut body, line, lineno)?;
                    State::Body { kind, headers, body, crc }
                }
            },
        };
    }

    match state {
        State::Searching if blocks.is_empty() =>
            Err(Error::MalformedArmor("No armor block found".into()).into()),
        State::Searching => Ok(blocks),
        State::Headers(kind, _) | State::Body { kind, .. } =>
            Err(Error::MalformedArmor(
                format!("Missing footer of {:?} armor", kind)).into()),
    }
}

fn trim_end(line: &[u8]) -> &[u8] {
    let end = line.iter()
        .rposition(|c| ! c.is_ascii_whitespace())
        .map(|p| p + 1)
        .unwrap_or(0);
    &line[..end]
}

/// Splits an armor header line of the form `Key: Value`.
fn parse_header(line: &[u8]) -> Option<(String, String)> {
    let line = String::from_utf8_lossy(line);
    let sep = line.find(": ")?;
    let key = &line[..sep];
    if key.is_empty() || key.chars().any(|c| c.is_whitespace()) {
        return None;
    }
    Some((key.to_string(), line[sep + 2..].to_string()))
}

fn push_body_line(body: &mut String, line: &[u8], lineno: usize)
                  -> Result<()> {
    for &c in line {
        match c {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' | b'=' =>
                body.push(c as char),
            c if c.is_ascii_whitespace() => (),
            _ => return Err(Error::MalformedArmor(format!(
                "Invalid character 0x{:02x} at line {}", c, lineno + 1))
                            .into()),
        }
    }
    Ok(())
}

fn finish(kind: Kind, headers: Vec<(String, String)>, body: &str,
          crc: Option<String>) -> Result<Block> {
    let data = base64::decode(body).map_err(|e| Error::MalformedArmor(
        format!("Invalid base64 in {:?} armor: {}", kind, e)))?;

    if let Some(crc) = crc {
        let expected = base64::decode(&crc).ok()
            .filter(|c| c.len() == 3)
            .map(|c| (c[0] as u32) << 16 | (c[1] as u32) << 8 | c[2] as u32)
            .ok_or_else(|| Error::MalformedArmor(
                format!("Invalid checksum {:?}", crc)))?;
        let got = CRC::new().update(&data).finalize();
        if expected != got {
            return Err(Error::MalformedArmor(format!(
                "Checksum mismatch: expected 0x{:06x}, got 0x{:06x}",
                expected, got)).into());
        }
    } else {
        log::debug!("{:?} armor without checksum", kind);
    }

    Ok(Block { kind, headers, data })
}

const CRC24_INIT: u32 = 0xB704CE;
const CRC24_POLY: u32 = 0x1864CFB;

struct CRC {
    n: u32,
}

/// Computes the CRC-24, (see [RFC 4880, section 6.1]).
///
/// [RFC 4880, section 6.1]: https://tools.ietf.org/html/rfc4880#section-6.1
impl CRC {
    fn new() -> Self {
        CRC { n: CRC24_INIT }
    }

    fn update(&mut self, buf: &[u8]) -> &Self {
        for octet in buf {
            self.n ^= (*octet as u32) << 16;
            for _ in 0..8 {
                self.n <<= 1;
                if self.n & 0x1000000 > 0 {
                    self.n ^= CRC24_POLY;
                }
            }
        }
        self
    }

    fn finalize(&self) -> u32 {
        self.n & 0xFFFFFF
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn crc() {
        let b = b"foobarbaz";
        let crcs = [
            0xb704ce,
            0x6d2804,
            0xa2d10d,
            0x4fc255,
            0x7aafca,
            0xc79c46,
            0x7334de,
            0x77dc72,
            0x000f65,
            0xf40d86,
        ];

        for len in 0..b.len() + 1 {
            assert_eq!(CRC::new().update(&b[..len]).finalize(), crcs[len]);
        }
    }

    fn err(input: &str) -> Error {
        decode_all(input.as_bytes()).unwrap_err().downcast::<Error>().unwrap()
    }

    const MARKER: &str = "-----BEGIN PGP MESSAGE-----\n\
                          \n\
                          ygNQR1A=\n\
                          =GG5/\n\
                          -----END PGP MESSAGE-----\n";

    #[test]
    fn detection() {
        assert!(is_armored(MARKER.as_bytes()));
        assert!(is_armored(b"\r\n  -----BEGIN PGP SIGNATURE-----"));
        assert!(! is_armored(b"\xca\x03PGP"));
        assert!(! is_armored(b""));
        assert!(! is_armored(b"   "));

        assert_eq!(Kind::detect(b"-----BEGIN PGP PUBLIC KEY BLOCK-----"),
                   Some(Kind::PublicKey));
        assert_eq!(Kind::detect(b"-----BEGIN PGP PUBLIC KEY-----"), None);
        assert_eq!(Kind::detect_footer(b"-----END PGP ARMORED FILE-----"),
                   Some(Kind::File));
    }

    #[test]
    fn simple() {
        let blocks = decode_all(MARKER.as_bytes()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind(), Kind::Message);
        assert!(blocks[0].headers().is_empty());
        assert_eq!(blocks[0].data(), b"\xca\x03PGP");
    }

    #[test]
    fn headers_and_crlf() {
        let input = "-----BEGIN PGP ARMORED FILE-----\r\n\
                     Comment: hello\r\n\
                     Version: 1\r\n\
                     \r\n\
                     ywti\r\n\
                     AAAAAABIZWxsbw==\r\n\
                     =Z6pN\r\n\
                     -----END PGP ARMORED FILE-----\r\n";
        let blocks = decode_all(input.as_bytes()).unwrap();
        assert_eq!(blocks[0].kind(), Kind::File);
        assert_eq!(blocks[0].headers(),
                   &[("Comment".into(), "hello".into()),
                     ("Version".into(), "1".into())][..]);
        assert_eq!(blocks[0].data(), b"\xcb\x0bb\x00\x00\x00\x00\x00Hello");
    }

    #[test]
    fn without_checksum_or_blank_line() {
        let input = "-----BEGIN PGP MESSAGE-----\n\
                     ygNQR1A=\n\
                     -----END PGP MESSAGE-----";
        assert_eq!(dearmor(input.as_bytes()).unwrap(), b"\xca\x03PGP");
    }

    #[test]
    fn concatenated_and_cleartext() {
        let input = format!("-----BEGIN PGP SIGNED MESSAGE-----\n\
                             Hash: SHA256\n\
                             \n\
                             Some text.\n\
                             {}\n\
                             garbage in between\n\
                             {}", MARKER, MARKER);
        let blocks = decode_all(input.as_bytes()).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(dearmor(input.as_bytes()).unwrap(),
                   b"\xca\x03PGP\xca\x03PGP");
    }

    #[test]
    fn malformed() {
        assert!(matches!(err("no armor here"), Error::MalformedArmor(_)));
        assert!(matches!(err(&MARKER.replace("GG5/", "AAAA")),
                         Error::MalformedArmor(_)));
        assert!(matches!(err(&MARKER.replace("-----END PGP MESSAGE-----", "")),
                         Error::MalformedArmor(_)));
        assert!(matches!(err(&MARKER.replace("END PGP MESSAGE", "END PGP SIGNATURE")),
                         Error::MalformedArmor(_)));
        assert!(matches!(err(&MARKER.replace("ygNQR1A=", "ygN*R1A=")),
                         Error::MalformedArmor(_)));
    }
}
