//! Signature subpackets and user attribute subpackets.
//!
//! Signature packets (version 4 and later) carry a hashed and an
//! unhashed area of subpackets, see [Section 5.2.3.1 of RFC 4880].
//! User attribute packets consist of a sequence of subpackets, see
//! [Section 5.12 of RFC 4880].  Both use the same framing, but
//! different type registries.
//!
//! Every subpacket is decoded from its own bounded reader.  If a
//! subpacket body is malformed, the remaining subpackets are still
//! decoded, and the first error is returned once the area has been
//! enumerated.  If the framing itself is broken, enumeration stops.
//!
//!   [Section 5.2.3.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.1
//!   [Section 5.12 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12

use anyhow::Context as _;

use crate::{Error, Item, KeyID, Reader, Result};
use crate::fmt::hex;
use crate::packet::signature;
use crate::parse::Context;
use crate::types::{
    AEADAlgorithm,
    CodedEnum,
    CompressionAlgorithm,
    Duration,
    Features,
    HashAlgorithm,
    KeyFlags,
    KeyServerPreferences,
    PublicKeyAlgorithm,
    ReasonForRevocation,
    RevocationKey,
    SubpacketTag,
    SymmetricAlgorithm,
    Tag,
    Timestamp,
    UserAttributeSubpacketTag,
};

/// Suffix of the item name of critical subpackets.
const CRITICAL: &str = " <critical>";

/// Decodes a subpacket area.
///
/// `owner` is the tag of the packet containing the area, it selects
/// the subpacket registry: [`Tag::Signature`] or
/// [`Tag::UserAttribute`].  One item per subpacket is appended to
/// `parent`.
///
///   [`Tag::Signature`]: ../types/enum.Tag.html#variant.Signature
///   [`Tag::UserAttribute`]: ../types/enum.Tag.html#variant.UserAttribute
pub fn decode_area(owner: Tag, r: &mut Reader, cx: &mut Context,
                   parent: &mut Item) -> Result<()> {
    let mut first_error = None;

    while ! r.is_empty() {
        let (raw, mut body) = match next_subpacket(r) {
            Ok(s) => s,
            // Earlier problems are reported first.
            Err(e) => return Err(first_error.unwrap_or(e)),
        };
        let critical = raw & 0x80 != 0;
        let code = raw & 0x7f;
        let name = match owner {
            Tag::UserAttribute => UserAttributeSubpacketTag::from(code).label(),
            _ => SubpacketTag::from(code).label(),
        };
        let item = Item::new(if critical { format!("{}{}", name, CRITICAL) }
                             else { name.clone() })
            .dump_if(cx.options().get_debug(), body.peek_hex_dump(1));

        let result = parent.push_with(item, |item| match owner {
            Tag::UserAttribute =>
                user_attribute(UserAttributeSubpacketTag::from(code),
                               &mut body, cx, item),
            _ => signature_subpacket(SubpacketTag::from(code),
                                     &mut body, cx, item),
        });

        if let Err(e) = result {
            log::warn!("Failed to decode {}: {}", name, e);
            if first_error.is_none() {
                first_error = Some(e.context(format!("Decoding {}", name)));
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Splits the next subpacket off the area.
///
/// Returns the raw type octet and a reader over the body.
fn next_subpacket<'a>(r: &mut Reader<'a>) -> Result<(u8, Reader<'a>)> {
    let len = subpacket_length(r)?;
    if len == 0 {
        return Err(Error::MalformedPacket(
            "Subpacket without type".into()).into());
    }
    let mut body = r.sub_reader(len)
        .context("Subpacket exceeds its area")?;
    let raw = body.read_byte()?;
    Ok((raw, body))
}

/// Decodes a subpacket length, see [Section 5.2.3.1 of RFC 4880].
///
/// The length includes the type octet.
///
///   [Section 5.2.3.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.1
pub fn subpacket_length(r: &mut Reader) -> Result<usize> {
    let octet1 = r.read_byte()? as usize;
    if octet1 < 192 {
        // One octet.
        Ok(octet1)
    } else if octet1 < 255 {
        // Two octets length.
        let octet2 = r.read_byte()? as usize;
        Ok(((octet1 - 192) << 8) + octet2 + 192)
    } else {
        // Five octets.
        Ok(r.read_be_u32()? as usize)
    }
}

fn signature_subpacket(tag: SubpacketTag, r: &mut Reader, cx: &mut Context,
                       item: &mut Item) -> Result<()> {
    let debug = cx.options().get_debug();

    match tag {
        SubpacketTag::SignatureCreationTime => {
            let t = Timestamp::from(r.read_be_u32()?);
            cx.set_sig_creation_time(t);
            item.set_value(cx.format_time(t));
        },
        SubpacketTag::SignatureExpirationTime => {
            let d = Duration::from(r.read_be_u32()?);
            let base = cx.take_sig_creation_time();
            expiration(cx, base, d, item);
        },
        SubpacketTag::KeyExpirationTime => {
            let d = Duration::from(r.read_be_u32()?);
            let base = cx.take_key_creation_time();
            expiration(cx, base, d, item);
        },
        SubpacketTag::ExportableCertification
            | SubpacketTag::Revocable
            | SubpacketTag::PrimaryUserID => {
            let b = r.read_byte()?;
            item.set_value(if b != 0 { "true" } else { "false" });
        },
        SubpacketTag::TrustSignature => {
            item.push(Item::new("Level").value(r.read_byte()?.to_string()));
            let amount = r.read_byte()?;
            let amount_item = Item::new("Trust amount").value(amount.to_string());
            item.push(match amount {
                120 => amount_item.note("complete"),
                60 => amount_item.note("partial"),
                _ => amount_item,
            });
        },
        SubpacketTag::RegularExpression => {
            let re = r.read_to_end();
            // The expression is NUL terminated.
            let re = match re.last() {
                Some(0) => &re[..re.len() - 1],
                _ => re,
            };
            item.set_value(String::from_utf8_lossy(re));
        },
        SubpacketTag::PreferredSymmetricAlgorithms =>
            for &b in r.read_to_end() {
                item.push(SymmetricAlgorithm::from(b)
                          .to_item("Symmetric Algorithm", debug));
            },
        SubpacketTag::PreferredHashAlgorithms =>
            for &b in r.read_to_end() {
                item.push(HashAlgorithm::from(b)
                          .to_item("Hash Algorithm", debug));
            },
        SubpacketTag::PreferredCompressionAlgorithms =>
            for &b in r.read_to_end() {
                item.push(CompressionAlgorithm::from(b)
                          .to_item("Compression Algorithm", debug));
            },
        SubpacketTag::PreferredAEADAlgorithms =>
            for &b in r.read_to_end() {
                item.push(AEADAlgorithm::from(b)
                          .to_item("AEAD Algorithm", debug));
            },
        SubpacketTag::RevocationKey => {
            let class = RevocationKey::from(r.read_byte()?);
            item.push(Item::new("Class").value(class.to_string()));
            item.push(PublicKeyAlgorithm::from(r.read_byte()?)
                      .to_item("Public-key Algorithm", debug));
            item.push(fingerprint(r.read_to_end()));
        },
        SubpacketTag::Issuer => {
            let keyid = KeyID::from_reader(r)?;
            item.set_value(keyid.to_string());
        },
        SubpacketTag::NotationData => notation(r, item)?,
        SubpacketTag::KeyServerPreferences =>
            for flag in KeyServerPreferences::new(r.read_to_end()).to_items() {
                item.push(flag);
            },
        SubpacketTag::KeyFlags =>
            for flag in KeyFlags::new(r.read_to_end()).to_items() {
                item.push(flag);
            },
        SubpacketTag::Features =>
            for flag in Features::new(r.read_to_end()).to_items() {
                item.push(flag);
            },
        SubpacketTag::PreferredKeyServer
            | SubpacketTag::PolicyURI
            | SubpacketTag::SignersUserID => {
            item.set_value(String::from_utf8_lossy(r.read_to_end()));
        },
        SubpacketTag::ReasonForRevocation => {
            item.push(ReasonForRevocation::from(r.read_byte()?)
                      .to_item("Reason", debug));
            let reason = r.read_to_end();
            if ! reason.is_empty() {
                item.push(Item::new("Additional information")
                          .value(String::from_utf8_lossy(reason)));
            }
        },
        SubpacketTag::SignatureTarget => {
            item.push(PublicKeyAlgorithm::from(r.read_byte()?)
                      .to_item("Public-key Algorithm", debug));
            item.push(HashAlgorithm::from(r.read_byte()?)
                      .to_item("Hash Algorithm", debug));
            let hash = r.read_to_end();
            item.push(Item::new("Hash")
                      .note(format!("{} bytes", hash.len()))
                      .dump(hex::dump(hash)));
        },
        SubpacketTag::EmbeddedSignature => {
            // The outer signature's pending times survive the inner one.
            let sig_time = cx.take_sig_creation_time();
            let key_time = cx.take_key_creation_time();
            let result = cx.nested(|cx| signature::decode(r, cx, item));
            cx.restore_creation_times(sig_time, key_time);
            result?
        },
        SubpacketTag::IssuerFingerprint
            | SubpacketTag::IntendedRecipient => {
            item.push(crate::packet::version_item(r.read_byte()?, 4));
            item.push(fingerprint(r.read_to_end()));
        },
        _ => {
            let rest = r.read_to_end();
            if ! rest.is_empty() {
                item.set_note(format!("{} bytes", rest.len()));
            }
        },
    }

    Ok(())
}

fn expiration(cx: &Context, base: Option<Timestamp>, d: Duration,
              item: &mut Item) {
    let (value, note) = cx.expiration(base, d);
    item.set_value(value);
    if let Some(note) = note {
        item.set_note(note);
    }
}

fn fingerprint(fp: &[u8]) -> Item {
    Item::new("Fingerprint")
        .note(format!("{} bytes", fp.len()))
        .dump(hex::dump(fp))
}

fn notation(r: &mut Reader, item: &mut Item) -> Result<()> {
    let flags = r.read(4)?;
    let human_readable = flags[0] & 0x80 != 0;
    item.push(Item::new("Flags")
              .value(if human_readable { "human-readable" }
                     else { "not human-readable" })
              .dump(hex::dump(flags)));

    let name_len = r.read_be_u16()? as usize;
    let value_len = r.read_be_u16()? as usize;
    let name = r.read(name_len)?;
    item.push(Item::new("Name").value(String::from_utf8_lossy(name)));

    let value = r.read(value_len)?;
    let value_item = Item::new("Value").note(format!("{} bytes", value_len));
    item.push(if human_readable {
        value_item.value(String::from_utf8_lossy(value))
    } else {
        value_item.dump(hex::dump(value))
    });
    Ok(())
}

fn user_attribute(tag: UserAttributeSubpacketTag, r: &mut Reader,
                  cx: &mut Context, item: &mut Item) -> Result<()> {
    let debug = cx.options().get_debug();

    if tag != UserAttributeSubpacketTag::Image {
        let rest = r.read_to_end();
        item.set_note(format!("{} bytes", rest.len()));
        return Ok(());
    }

    // The header length is little endian for historical reasons.
    let len = r.read(2)?;
    let header_len = len[0] as usize | (len[1] as usize) << 8;
    item.push(Item::new("Image header length")
              .value(header_len.to_string()));

    let version = r.read_byte()?;
    let name = match version {
        1 => "Version 1",
        100..=110 => "Private/Experimental",
        _ => "Unknown",
    };
    item.push(Item::new("Image header version")
              .value(format!("{} ({})", name, version))
              .dump_if(debug, hex::dump(&[version])));

    let mut consumed = 3;
    if version == 1 {
        let encoding = r.read_byte()?;
        let name = if encoding == 1 { "JPEG" } else { "Unknown" };
        item.push(Item::new("Image encoding")
                  .value(format!("{} ({})", name, encoding))
                  .dump_if(debug, hex::dump(&[encoding])));
        consumed += 1;
    }

    // Skip the reserved remainder of the header.
    r.read(header_len.saturating_sub(consumed))?;

    let image = r.read_to_end();
    item.push(Item::new("Image data").note(format!("{} bytes", image.len())));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Options;

    fn decode(owner: Tag, data: &[u8]) -> (Item, Result<()>) {
        let mut cx = Context::new(Options::default().utc(true));
        let mut parent = Item::new("Hashed Subpacket");
        let r = decode_area(owner, &mut Reader::new(data), &mut cx,
                            &mut parent);
        (parent, r)
    }

    #[test]
    fn lengths() {
        let mut r = Reader::new(&[0x05, 0xc0, 0x00, 0xdf, 0xff,
                                  0xff, 0x00, 0x00, 0x01, 0x00, 0xff, 0x00]);
        assert_eq!(subpacket_length(&mut r).unwrap(), 5);
        assert_eq!(subpacket_length(&mut r).unwrap(), 192);
        assert_eq!(subpacket_length(&mut r).unwrap(), 8383);
        assert_eq!(subpacket_length(&mut r).unwrap(), 256);
        assert!(subpacket_length(&mut r).is_err());
    }

    #[test]
    fn creation_and_expiration_time() {
        let (item, r) = decode(Tag::Signature,
                               &[0x05, 0x02, 0x5a, 0x52, 0xc5, 0x68,
                                 0x05, 0x03, 0x00, 0x01, 0x51, 0x80,
                                 0x05, 0x03, 0x00, 0x01, 0x51, 0x80]);
        r.unwrap();
        let c = item.children();
        assert_eq!(c[0].name(), "Signature Creation Time (sub 2)");
        assert_eq!(c[0].get_value(), Some("2018-01-08T01:12:08Z"));
        assert_eq!(c[1].name(), "Signature Expiration Time (sub 3)");
        assert_eq!(c[1].get_value(), Some("2018-01-09T01:12:08Z"));
        assert_eq!(c[1].get_note(), Some("1.0 days after"));
        // The creation time has been consumed.
        assert_eq!(c[2].get_value(), Some("1.0 days after"));
    }

    #[test]
    fn embedded_signature_keeps_outer_creation_time() {
        let (item, r) = decode(Tag::Signature, &[
            0x05, 0x02, 0x5a, 0x52, 0xc5, 0x68,
            // An embedded signature created 2020-01-01.
            0x14, 0x20,
            0x04, 0x00, 0x01, 0x08,
            0x00, 0x06, 0x05, 0x02, 0x5e, 0x0b, 0xe1, 0x00,
            0x00, 0x00,
            0xab, 0xcd,
            0x00, 0x01, 0x01,
            0x05, 0x03, 0x00, 0x01, 0x51, 0x80,
        ]);
        r.unwrap();
        let c = item.children();
        assert_eq!(c[1].name(), "Embedded Signature (sub 32)");
        let inner = c[1].child("Hashed Subpacket").unwrap();
        assert_eq!(inner.children()[0].get_value(),
                   Some("2020-01-01T00:00:00Z"));
        assert_eq!(c[2].name(), "Signature Expiration Time (sub 3)");
        assert_eq!(c[2].get_value(), Some("2018-01-09T01:12:08Z"));
        assert_eq!(c[2].get_note(), Some("1.0 days after"));
    }

    #[test]
    fn critical_issuer() {
        let (item, r) = decode(Tag::Signature,
                               &[0x09, 0x90, 0xb4, 0xda, 0x3b, 0xae,
                                 0x7e, 0x20, 0xb8, 0x1c]);
        r.unwrap();
        assert_eq!(item.children()[0].name(), "Issuer (sub 16) <critical>");
        assert_eq!(item.children()[0].get_value(), Some("0xb4da3bae7e20b81c"));
    }

    #[test]
    fn notation_data() {
        let mut data = vec![0x18, 0x14, 0x80, 0, 0, 0, 0x00, 0x0b, 0x00, 0x04];
        data.extend_from_slice(b"test@sq.org");
        data.extend_from_slice(b"yes!");
        let (item, r) = decode(Tag::Signature, &data);
        r.unwrap();
        let n = &item.children()[0];
        assert_eq!(n.name(), "Notation Data (sub 20)");
        assert_eq!(n.children()[0].get_value(), Some("human-readable"));
        assert_eq!(n.children()[1].get_value(), Some("test@sq.org"));
        assert_eq!(n.children()[2].get_value(), Some("yes!"));
    }

    #[test]
    fn key_flags_and_preferences() {
        let (item, r) = decode(Tag::Signature,
                               &[0x02, 0x1b, 0x03,
                                 0x04, 0x0b, 0x09, 0x08, 0x07]);
        r.unwrap();
        let flags = &item.children()[0];
        assert_eq!(flags.name(), "Key Flags (sub 27)");
        assert_eq!(flags.children()[0].get_note(), Some("set"));
        assert_eq!(flags.children()[1].get_note(), Some("set"));
        assert_eq!(flags.children()[2].get_note(), Some("unset"));

        let prefs = &item.children()[1];
        assert_eq!(prefs.name(), "Preferred Symmetric Algorithms (sub 11)");
        assert_eq!(prefs.children().len(), 3);
        assert_eq!(prefs.children()[0].get_value(),
                   Some("AES with 256-bit key (sym 9)"));
    }

    #[test]
    fn revocation() {
        let mut data = vec![0x17, 0x0c, 0x80, 0x01];
        data.extend_from_slice(&[0xaa; 20]);
        data.extend_from_slice(&[0x05, 0x1d, 0x01, b'n', b'e', b'w']);
        let (item, r) = decode(Tag::Signature, &data);
        r.unwrap();
        let key = &item.children()[0];
        assert_eq!(key.children()[0].get_value(), Some("Normal (0x80)"));
        assert_eq!(key.children()[2].get_note(), Some("20 bytes"));
        let reason = &item.children()[1];
        assert_eq!(reason.children()[0].get_value(),
                   Some("Key is superseded (1)"));
        assert_eq!(reason.children()[1].get_value(), Some("new"));
    }

    #[test]
    fn malformed_body_does_not_stop_enumeration() {
        // A truncated creation time followed by an intact issuer.
        let (item, r) = decode(Tag::Signature,
                               &[0x03, 0x02, 0x5a, 0x52,
                                 0x09, 0x10, 0xb4, 0xda, 0x3b, 0xae,
                                 0x7e, 0x20, 0xb8, 0x1c]);
        let err = r.unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::UnexpectedEof));
        assert_eq!(item.children().len(), 2);
        assert_eq!(item.children()[0].get_value(), None);
        assert_eq!(item.children()[1].get_value(), Some("0xb4da3bae7e20b81c"));
    }

    #[test]
    fn broken_framing_stops_enumeration() {
        let (item, r) = decode(Tag::Signature,
                               &[0x02, 0x19, 0x01, 0x10, 0x10]);
        assert!(r.is_err());
        assert_eq!(item.children().len(), 1);
        assert_eq!(item.children()[0].get_value(), Some("true"));
    }

    #[test]
    fn broken_framing_reports_earlier_error() {
        // A truncated creation time, then a subpacket overrunning the
        // area.
        let (item, r) = decode(Tag::Signature,
                               &[0x03, 0x02, 0x5a, 0x52,
                                 0x09, 0x10, 0xb4]);
        let err = r.unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::UnexpectedEof));
        assert_eq!(err.to_string(),
                   "Decoding Signature Creation Time (sub 2)");
        assert_eq!(item.children().len(), 1);
    }

    #[test]
    fn unknown_and_private() {
        let (item, r) = decode(Tag::Signature,
                               &[0x03, 0x65, 0x01, 0x02, 0x01, 0x2a]);
        r.unwrap();
        assert_eq!(item.children()[0].name(),
                   "Private/Experimental algorithm (sub 101)");
        assert_eq!(item.children()[0].get_note(), Some("2 bytes"));
        assert_eq!(item.children()[1].name(), "Unknown (sub 42)");
    }

    #[test]
    fn image_attribute() {
        let mut data = vec![0x16, 0x01, 0x10, 0x00, 0x01, 0x01];
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&[0xff, 0xd8, 0xff, 0xe0, 0x00]);
        data[0] = (data.len() - 1) as u8;
        let (item, r) = decode(Tag::UserAttribute, &data);
        r.unwrap();
        let image = &item.children()[0];
        assert_eq!(image.name(), "Image Attribute (sub 1)");
        assert_eq!(image.child("Image header length").unwrap().get_value(),
                   Some("16"));
        assert_eq!(image.child("Image header version").unwrap().get_value(),
                   Some("Version 1 (1)"));
        assert_eq!(image.child("Image encoding").unwrap().get_value(),
                   Some("JPEG (1)"));
        let data = image.child("Image data").unwrap();
        assert_eq!(data.get_note(), Some("5 bytes"));
        assert_eq!(data.get_dump(), None);
    }
}
