//! Dumping OpenPGP data.
//!
//! A [`Parser`] turns binary or ASCII armored OpenPGP data into a
//! [`Dump`]: one [`Item`] tree per top-level packet plus the errors
//! encountered on the way.  Errors never stop the dump early, except
//! for framing errors: once a packet header is broken, nothing after
//! it can be located.
//!
//! Every call to [`Parser::parse`] uses a fresh [`Context`], so
//! parsing the same data twice yields the same dump.
//!
//!   [`Parser`]: struct.Parser.html
//!   [`Dump`]: struct.Dump.html
//!   [`Item`]: ../struct.Item.html
//!   [`Parser::parse`]: struct.Parser.html#method.parse
//!   [`Context`]: struct.Context.html

use std::borrow::Cow;
use std::io;

use serde::Serialize;

use crate::{Error, Item, Options, Result};
use crate::armor;
use crate::packet::{self, header::{OpaquePacket, PacketSplitter}};

mod context;
pub use self::context::{
    Context,
    EncryptionMode,
    MAX_INFLATED_SIZE,
    MAX_RECURSION_DEPTH,
};

/// Parses OpenPGP data into a [`Dump`].
///
///   [`Dump`]: struct.Dump.html
///
/// # Examples
///
/// ```
/// use sequoia_pgpdump::{Options, parse::Parser};
///
/// let dump = Parser::new(Options::default()).parse(b"\xca\x03PGP");
/// assert!(dump.is_ok());
/// assert_eq!(dump.packets()[0].children()[0].get_value(), Some("PGP"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Parser {
    options: Options,
}

impl Parser {
    /// Creates a parser.
    pub fn new(options: Options) -> Self {
        Parser { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parses binary or ASCII armored data.
    ///
    /// Armored input is detected automatically.  If the `armor`
    /// option is set, binary input is rejected.
    pub fn parse(&self, input: &[u8]) -> Dump {
        let mut dump = Dump::default();
        let data = match self.dearmor(input) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("{}", e);
                dump.errors.push(e);
                return dump;
            },
        };

        let mut cx = Context::new(self.options);
        for packet in PacketSplitter::new(&data) {
            match packet {
                Ok(packet) => dump.push(&packet, &mut cx),
                Err(e) => dump.errors.push(e),
            }
        }
        dump
    }

    /// Dumps already framed packets.
    pub fn parse_packets<I>(&self, packets: I) -> Dump
        where I: IntoIterator<Item = OpaquePacket>
    {
        let mut dump = Dump::default();
        let mut cx = Context::new(self.options);
        for packet in packets {
            dump.push(&packet, &mut cx);
        }
        dump
    }

    fn dearmor<'a>(&self, input: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        if armor::is_armored(input) {
            let data = armor::dearmor(input)?;
            log::debug!("Dearmored {} bytes", data.len());
            Ok(Cow::Owned(data))
        } else if self.options.get_armor() {
            Err(Error::MalformedArmor("Input is not ASCII armored".into())
                .into())
        } else {
            Ok(Cow::Borrowed(input))
        }
    }
}

/// The result of parsing.
///
/// Serializes to JSON as an object with the packet trees under
/// `"Packet"`.  A dump without packets serializes to `{}`.
#[derive(Debug, Default, Serialize)]
pub struct Dump {
    #[serde(rename = "Packet", skip_serializing_if = "Vec::is_empty")]
    packets: Vec<Item>,
    #[serde(skip)]
    errors: Vec<anyhow::Error>,
}

impl Dump {
    fn push(&mut self, packet: &OpaquePacket, cx: &mut Context) {
        let (item, result) = packet::decode(packet, cx);
        if let Err(e) = result {
            log::warn!("{:#}", e);
            self.errors.push(e);
        }
        self.packets.push(item);
    }

    /// Returns whether no errors occurred.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the decoded packets.
    pub fn packets(&self) -> &[Item] {
        &self.packets
    }

    /// Returns the errors in the order they occurred.
    pub fn errors(&self) -> &[anyhow::Error] {
        &self.errors
    }

    /// Serializes the packets as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        })
    }

    /// Writes the packets as text trees.
    pub fn write_text(&self, output: &mut dyn io::Write) -> io::Result<()> {
        for packet in &self.packets {
            packet.write_text(output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fmt::hex;

    fn parse(data: &[u8]) -> Dump {
        Parser::new(Options::default().utc(true)).parse(data)
    }

    // A signature packet by an ECDSA key.
    const SIGNATURE: &str = "
        c2 21
        04 01 13 08
        00 06 05 02 5a 52 c5 68
        00 0a 09 10 b4 da 3b ae 7e 20 b8 1c
        cf 0d
        00 10 aa bb
        00 08 cc";

    #[test]
    fn signature() {
        let dump = parse(&hex::decode_pretty(SIGNATURE).unwrap());
        assert!(dump.is_ok());
        let sig = &dump.packets()[0];
        assert_eq!(sig.name(), "Signature Packet (tag 2)");
        assert_eq!(sig.get_note(), Some("33 bytes"));
        assert_eq!(sig.child("Signature type").unwrap().get_value(),
                   Some("Signature of a canonical text document (0x01)"));
        assert_eq!(sig.child("Public-key algorithm").unwrap().get_value(),
                   Some("ECDSA public key algorithm (pub 19)"));
        assert_eq!(sig.child("Hashed Subpacket").unwrap().children()[0]
                   .get_value(), Some("2018-01-08T01:12:08Z"));
        assert_eq!(sig.child("Unhashed Subpacket").unwrap().children()[0]
                   .name(), "Issuer (sub 16)");
        assert!(sig.child("ECDSA value r").is_some());
        assert!(sig.child("ECDSA value s").is_some());
    }

    #[test]
    fn empty() {
        let dump = parse(b"");
        assert!(dump.is_ok());
        assert!(dump.packets().is_empty());
        assert_eq!(dump.to_json(false).unwrap(), "{}");
        assert_eq!(dump.to_json(true).unwrap(), "{}");
    }

    #[test]
    fn session_key_mode_is_consumed() {
        // SKESK, SED, SED.
        let data = hex::decode_pretty("c3 04 04 09 00 08  c9 02 aa bb  c9 01 cc")
            .unwrap();
        let dump = parse(&data);
        assert!(dump.is_ok());
        let note = |i: usize| dump.packets()[i].children()[0].get_note();
        assert_eq!(note(1),
                   Some("sym alg is specified in sym-key encrypted session key; \
                         2 bytes"));
        assert_eq!(note(2),
                   Some("sym alg is IDEA, simple string-to-key; 1 bytes"));
    }

    #[test]
    fn idempotent() {
        let data = hex::decode_pretty(SIGNATURE).unwrap();
        let parser = Parser::new(Options::default().debug(true).integer(true));
        let a = parser.parse(&data);
        let b = parser.parse(&data);
        assert_eq!(a.packets(), b.packets());
        assert_eq!(a.to_json(false).unwrap(), b.to_json(false).unwrap());
    }

    #[test]
    fn errors_do_not_stop_the_dump() {
        // A truncated one-pass signature followed by a marker.
        let data = hex::decode_pretty("c4 02 03 00  ca 03 50 47 50").unwrap();
        let dump = parse(&data);
        assert!(! dump.is_ok());
        assert_eq!(dump.errors().len(), 1);
        assert_eq!(dump.packets().len(), 2);
        assert_eq!(dump.packets()[1].name(),
                   "Marker Packet (Obsolete Literal Packet) (tag 10)");
    }

    #[test]
    fn framing_errors_stop_the_dump() {
        let data = hex::decode_pretty("ca 03 50 47 50  4a 00  ca 00").unwrap();
        let dump = parse(&data);
        assert_eq!(dump.packets().len(), 1);
        assert_eq!(dump.errors().len(), 1);
        assert!(dump.errors()[0].downcast_ref::<Error>()
                .map(|e| matches!(e, Error::MalformedPacket(_)))
                .unwrap_or(false));
    }

    #[test]
    fn armor() {
        let armored = "-----BEGIN PGP MESSAGE-----\n\
                       \n\
                       ygNQR1A=\n\
                       =GG5/\n\
                       -----END PGP MESSAGE-----\n";
        let dump = parse(armored.as_bytes());
        assert!(dump.is_ok());
        assert_eq!(dump.packets().len(), 1);

        let strict = Parser::new(Options::default().armor(true));
        assert!(strict.parse(armored.as_bytes()).is_ok());
        let dump = strict.parse(b"\xca\x03PGP");
        assert!(dump.packets().is_empty());
        assert!(dump.errors()[0].downcast_ref::<Error>()
                .map(|e| matches!(e, Error::MalformedArmor(_)))
                .unwrap_or(false));
    }

    #[test]
    fn framed_packets() {
        use crate::packet::header::CTB;
        use crate::types::Tag;

        let packets = vec![
            OpaquePacket::new(CTB::New(Tag::PKESK), vec![0x03]),
            OpaquePacket::new(CTB::New(Tag::SEIP), vec![0x01, 0x00]),
        ];
        let dump = Parser::new(Options::default()).parse_packets(packets);
        // The truncated session key packet still selects the mode.
        assert_eq!(dump.errors().len(), 1);
        assert_eq!(dump.packets()[1].children()[1].get_note(),
                   Some("sym alg is specified in pub-key encrypted session key; \
                         1 bytes"));
    }

    #[test]
    fn text() {
        let mut out = Vec::new();
        parse(b"\xca\x03PGP").write_text(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
"Marker Packet (Obsolete Literal Packet) (tag 10) (3 bytes)
└── Marker: PGP (3 bytes)
");
    }
}
