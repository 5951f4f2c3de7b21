//! Public and secret key packets.
//!
//! Primary keys and subkeys share the same layout, see [Section 5.5
//! of RFC 4880].  Version 5 keys are described in [Section 5.5 of
//! RFC 4880bis].
//!
//!   [Section 5.5 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.5
//!   [Section 5.5 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.5

use crate::{Error, Item, Reader, Result};
use crate::fmt::hex;
use crate::mpis;
use crate::packet::{opaque_item, version_item};
use crate::parse::Context;
use crate::s2k;
use crate::types::{
    AEADAlgorithm,
    CodedEnum,
    PublicKeyAlgorithm,
    SymmetricAlgorithm,
    Timestamp,
};

/// Secret key material is not encrypted.
const S2K_USAGE_UNENCRYPTED: u8 = 0;
/// Secret key material is protected using AEAD.
const S2K_USAGE_AEAD: u8 = 253;
/// Secret key material is encrypted, and protected by a SHA-1 hash.
const S2K_USAGE_SHA1: u8 = 254;
/// Secret key material is encrypted, and protected by a checksum.
const S2K_USAGE_CHECKSUM: u8 = 255;

pub(crate) fn decode_public(r: &mut Reader, cx: &mut Context, item: &mut Item)
                            -> Result<()> {
    public_part(r, cx, item)?;
    Ok(())
}

pub(crate) fn decode_secret(r: &mut Reader, cx: &mut Context, item: &mut Item)
                            -> Result<()> {
    let (version, algo) = match public_part(r, cx, item)? {
        Some(public) => public,
        None => return Ok(()),
    };
    let cx = &*cx;
    let debug = cx.options().get_debug();

    let usage = r.read_byte()?;
    item.push(usage_item(usage));

    match usage {
        S2K_USAGE_UNENCRYPTED => {
            with_counted(version, 4, r, item, "Secret key material",
                         |r, item| mpis::secret_key(algo, r, cx, item))?;
            checksum(r, item)
        },
        S2K_USAGE_AEAD | S2K_USAGE_SHA1 | S2K_USAGE_CHECKSUM => {
            with_counted(version, 1, r, item, "S2K parameters",
                         |r, item| protection(usage, r, cx, item))?;
            encrypted_material(version, algo, r, cx, item)
        },
        _ => {
            // Legacy: the octet is the cipher, and the key is the MD5
            // hash of the password.
            let sym = SymmetricAlgorithm::from(usage);
            item.push(sym.to_item("Symmetric Algorithm", debug));
            iv(sym.block_size(), r, item)?;
            encrypted_material(version, algo, r, cx, item)
        },
    }
}

/// Decodes the fields common to public and secret keys.
///
/// Returns the version and the algorithm, or `None` if the version
/// is not supported.
fn public_part(r: &mut Reader, cx: &mut Context, item: &mut Item)
               -> Result<Option<(u8, PublicKeyAlgorithm)>> {
    let debug = cx.options().get_debug();

    let version = r.read_byte()?;
    item.push(version_item(version, 4));
    if ! (2..=5).contains(&version) {
        log::debug!("Unsupported key version {}", version);
        return Ok(None);
    }

    let t = Timestamp::from(r.read_be_u32()?);
    cx.set_key_creation_time(t);
    item.push(cx.time_item("Public key creation time", t));

    if version < 4 {
        let days = r.read_be_u16()?;
        let valid = Item::new("Valid days").value(days.to_string());
        item.push(if days == 0 { valid.note("forever") } else { valid });
    }

    let algo = PublicKeyAlgorithm::from(r.read_byte()?);
    item.push(algo.to_item("Public-key Algorithm", debug));

    let cx = &*cx;
    with_counted(version, 4, r, item, "Public key material",
                 |r, item| mpis::public_key(algo, r, cx, item))?;
    Ok(Some((version, algo)))
}

/// Runs `f` on a field that version 5 keys prefix with an octet
/// count of `width` octets.
fn with_counted<F>(version: u8, width: usize, r: &mut Reader, item: &mut Item,
                   name: &str, f: F) -> Result<()>
    where F: FnOnce(&mut Reader, &mut Item) -> Result<()>
{
    if version != 5 {
        return f(r, item);
    }

    let len = match width {
        1 => r.read_byte()? as usize,
        _ => r.read_be_u32()? as usize,
    };
    item.push(Item::new(format!("{} length", name))
              .value(len.to_string())
              .note("bytes"));
    let mut counted = r.sub_reader(len)?;
    f(&mut counted, item)
}

fn usage_item(usage: u8) -> Item {
    let value = match usage {
        S2K_USAGE_UNENCRYPTED => "Unencrypted",
        S2K_USAGE_AEAD => "AEAD protected",
        S2K_USAGE_SHA1 => "Encrypted, SHA-1 protected",
        S2K_USAGE_CHECKSUM => "Encrypted, checksum protected",
        _ => "Encrypted with simple string-to-key",
    };
    Item::new("String-to-Key usage")
        .value(value)
        .note(format!("s2k usage {}", usage))
}

/// Decodes how the secret key material is protected.
fn protection(usage: u8, r: &mut Reader, cx: &Context, item: &mut Item)
              -> Result<()> {
    let debug = cx.options().get_debug();

    let sym = SymmetricAlgorithm::from(r.read_byte()?);
    item.push(sym.to_item("Symmetric Algorithm", debug));
    let aead = if usage == S2K_USAGE_AEAD {
        let aead = AEADAlgorithm::from(r.read_byte()?);
        item.push(aead.to_item("AEAD Algorithm", debug));
        Some(aead)
    } else {
        None
    };

    if s2k::decode(r, cx, item)? {
        iv(match aead {
            Some(aead) => aead.iv_size(),
            None => sym.block_size(),
        }, r, item)?;
    }
    Ok(())
}

fn iv(size: Option<usize>, r: &mut Reader, item: &mut Item) -> Result<()> {
    let size = size.ok_or_else(|| Error::MalformedPacket(
        "IV of unknown size".into()))?;
    item.push(Item::new("IV").dump(hex::dump(r.read(size)?)));
    Ok(())
}

fn encrypted_material(version: u8, algo: PublicKeyAlgorithm, r: &mut Reader,
                      cx: &Context, item: &mut Item) -> Result<()> {
    let show = cx.options().get_debug();
    match version {
        // The MPI lengths of version 3 keys are in the clear.
        2 | 3 => {
            mpis::encrypted_secret_key(algo, r, cx, item)?;
            checksum(r, item)
        },
        5 => {
            let len = r.read_be_u32()? as usize;
            item.push(opaque_item("Encrypted secret key material",
                                  r.read(len)?, show));
            Ok(())
        },
        _ => {
            let material = r.read_to_end();
            if ! material.is_empty() {
                item.push(opaque_item("Encrypted secret key material",
                                      material, show));
            }
            Ok(())
        },
    }
}

fn checksum(r: &mut Reader, item: &mut Item) -> Result<()> {
    item.push(Item::new("Checksum").dump(hex::dump(r.read(2)?)));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Options;

    const CREATED: [u8; 4] = [0x5a, 0x52, 0xc5, 0x68];
    const ED25519: [u8; 10] =
        [0x09, 0x2b, 0x06, 0x01, 0x04, 0x01, 0xda, 0x47, 0x0f, 0x01];

    fn public_v4() -> Vec<u8> {
        let mut body = vec![0x04];
        body.extend_from_slice(&CREATED);
        body.push(0x16);
        body.extend_from_slice(&ED25519);
        body.extend_from_slice(&[0x00, 0x0f, 0x40, 0xaa]);
        body
    }

    fn names(item: &Item) -> Vec<&str> {
        item.children().iter().map(|c| c.name()).collect()
    }

    fn run(secret: bool, body: &[u8]) -> (Item, Result<()>, Context) {
        let mut cx = Context::new(Options::default().utc(true));
        let mut item = Item::new("Key");
        let mut r = Reader::new(body);
        let result = if secret {
            decode_secret(&mut r, &mut cx, &mut item)
        } else {
            decode_public(&mut r, &mut cx, &mut item)
        };
        (item, result, cx)
    }

    #[test]
    fn v4_public() {
        let (item, r, mut cx) = run(false, &public_v4());
        r.unwrap();
        assert_eq!(names(&item),
                   vec!["Version", "Public key creation time",
                        "Public-key Algorithm", "ECC Curve OID",
                        "EdDSA EC point"]);
        assert_eq!(item.children()[3].get_value(),
                   Some("ed25519 (256bits key size)"));
        assert_eq!(item.children()[4].get_note(), Some("15 bits"));
        assert_eq!(cx.take_key_creation_time(),
                   Some(Timestamp::from(0x5a52c568)));
    }

    #[test]
    fn v3_public() {
        let mut body = vec![0x03];
        body.extend_from_slice(&CREATED);
        body.extend_from_slice(&[0x00, 0x00, 0x01,
                                 0x00, 0x08, 0xc5,
                                 0x00, 0x02, 0x03]);
        let (item, r, _) = run(false, &body);
        r.unwrap();
        assert_eq!(item.children()[0].get_note(), Some("old"));
        assert_eq!(item.children()[2].get_note(), Some("forever"));
        assert_eq!(item.children()[4].name(), "RSA public modulus n");
        assert_eq!(item.children()[5].name(), "RSA public encryption exponent e");
    }

    #[test]
    fn v5_public() {
        let mut body = vec![0x05];
        body.extend_from_slice(&CREATED);
        body.push(0x16);
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x0e]);
        body.extend_from_slice(&ED25519);
        body.extend_from_slice(&[0x00, 0x0f, 0x40, 0xaa]);
        let (item, r, _) = run(false, &body);
        r.unwrap();
        assert_eq!(item.children()[0].get_note(), Some("draft"));
        let len = item.child("Public key material length").unwrap();
        assert_eq!(len.get_value(), Some("14"));
        assert!(item.child("EdDSA EC point").is_some());
    }

    #[test]
    fn unknown_version() {
        let (item, r, mut cx) = run(true, &[0x09, 0x01, 0x02]);
        r.unwrap();
        assert_eq!(item.children().len(), 1);
        assert_eq!(cx.take_key_creation_time(), None);
    }

    #[test]
    fn unencrypted_secret() {
        let mut body = public_v4();
        body.extend_from_slice(&[0x00, 0x00, 0x08, 0x99, 0x12, 0x34]);
        let (item, r, _) = run(true, &body);
        r.unwrap();
        let n = names(&item);
        assert_eq!(&n[5..], &["String-to-Key usage", "EdDSA secret key",
                              "Checksum"]);
        assert_eq!(item.children()[5].get_value(), Some("Unencrypted"));
        assert_eq!(item.children()[7].get_dump(), Some("12 34"));
    }

    #[test]
    fn encrypted_secret() {
        let mut body = public_v4();
        body.extend_from_slice(&[0xfe, 0x09, 0x03, 0x08,
                                 1, 2, 3, 4, 5, 6, 7, 8, 0xc3]);
        body.extend_from_slice(&[0x44; 16]);
        body.extend_from_slice(&[0x55; 30]);
        let (item, r, _) = run(true, &body);
        r.unwrap();
        let n = names(&item);
        assert_eq!(&n[5..], &["String-to-Key usage", "Symmetric Algorithm",
                              "String-to-Key (S2K) Algorithm", "IV",
                              "Encrypted secret key material"]);
        assert_eq!(item.children()[8].get_dump().unwrap().len(), 16 * 3 - 1);
        assert_eq!(item.children()[9].get_note(), Some("30 bytes"));
        assert_eq!(item.children()[9].get_dump(), None);
    }

    #[test]
    fn gnu_dummy() {
        let mut body = public_v4();
        body.extend_from_slice(b"\xfe\x00\x65\x00GNU\x01");
        let (item, r, _) = run(true, &body);
        r.unwrap();
        let n = names(&item);
        assert_eq!(&n[5..], &["String-to-Key usage", "Symmetric Algorithm",
                              "String-to-Key (S2K) Algorithm"]);
    }

    #[test]
    fn v3_legacy_encrypted() {
        let mut body = vec![0x03];
        body.extend_from_slice(&CREATED);
        body.extend_from_slice(&[0x00, 0x0a, 0x11,
                                 0x00, 0x01, 0x01, 0x00, 0x01, 0x01,
                                 0x00, 0x01, 0x01, 0x00, 0x01, 0x01]);
        // IDEA, 8 byte IV, then x.
        body.push(0x01);
        body.extend_from_slice(&[0x66; 8]);
        body.extend_from_slice(&[0x00, 0x10, 0xde, 0xad, 0xbe, 0xef]);
        let (item, r, _) = run(true, &body);
        r.unwrap();
        let n = names(&item);
        assert_eq!(&n[8..], &["String-to-Key usage", "Symmetric Algorithm",
                              "IV", "Encrypted DSA secret exponent x",
                              "Checksum"]);
        assert_eq!(item.children()[9].get_value(), Some("IDEA (sym 1)"));
        assert_eq!(item.children()[11].get_note(), Some("16 bits"));
    }

    #[test]
    fn v5_aead_secret() {
        let mut body = vec![0x05];
        body.extend_from_slice(&CREATED);
        body.push(0x16);
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x0e]);
        body.extend_from_slice(&ED25519);
        body.extend_from_slice(&[0x00, 0x0f, 0x40, 0xaa]);
        // Usage, parameter count, AES-128, OCB, simple S2K, nonce.
        body.extend_from_slice(&[0xfd, 0x13, 0x07, 0x02, 0x00, 0x08]);
        body.extend_from_slice(&[0x77; 15]);
        body.extend_from_slice(&[0x00, 0x00, 0x00, 0x03, 0x01, 0x02, 0x03]);
        let (item, r, _) = run(true, &body);
        r.unwrap();
        assert_eq!(item.child("S2K parameters length").unwrap().get_value(),
                   Some("19"));
        assert_eq!(item.child("AEAD Algorithm").unwrap().get_value(),
                   Some("OCB mode (aead 2)"));
        assert_eq!(item.child("Encrypted secret key material").unwrap()
                   .get_note(), Some("3 bytes"));
    }

    #[test]
    fn unknown_cipher_iv_is_an_error() {
        let mut body = public_v4();
        body.extend_from_slice(&[0xfe, 0x42, 0x00, 0x08, 0x01, 0x02]);
        let (item, r, _) = run(true, &body);
        assert!(r.is_err());
        assert!(item.child("String-to-Key (S2K) Algorithm").is_some());
        assert!(item.child("IV").is_none());
    }
}
