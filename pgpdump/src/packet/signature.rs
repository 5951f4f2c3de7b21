//! Signature packets.
//!
//! See [Section 5.2 of RFC 4880].
//!
//!   [Section 5.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2

use crate::{Item, KeyID, Reader, Result};
use crate::fmt::hex;
use crate::mpis;
use crate::packet::version_item;
use crate::parse::Context;
use crate::subpacket;
use crate::types::{
    CodedEnum,
    HashAlgorithm,
    PublicKeyAlgorithm,
    SignatureType,
    Tag,
    Timestamp,
};

/// Decodes the body of a signature packet.
///
/// This is also used for embedded signatures.
pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    // A creation time only applies to the signature that carries it.
    cx.take_sig_creation_time();

    let version = r.read_byte()?;
    item.push(version_item(version, 4));
    match version {
        2 | 3 => decode_v3(r, cx, item),
        4 | 5 => decode_v4(r, cx, item),
        _ => {
            log::debug!("Unsupported signature version {}", version);
            Ok(())
        },
    }
}

fn decode_v3(r: &mut Reader, cx: &mut Context, item: &mut Item)
             -> Result<()> {
    let debug = cx.options().get_debug();

    let len = r.read_byte()? as usize;
    let mut hashed = r.sub_reader(len)?;
    item.push_with(
        Item::new("Hashed material").note(format!("{} bytes", len)),
        |hashed_item| {
            hashed_item.push(SignatureType::from(hashed.read_byte()?)
                             .to_item("Signature type", debug));
            let t = Timestamp::from(hashed.read_be_u32()?);
            cx.set_sig_creation_time(t);
            hashed_item.push(cx.time_item("Signature creation time", t));
            Ok(())
        })?;

    let keyid = KeyID::from_reader(r)?;
    item.push(Item::new("Key ID").value(keyid.to_string()));
    let pk_algo = PublicKeyAlgorithm::from(r.read_byte()?);
    item.push(pk_algo.to_item("Public-key algorithm", debug));
    item.push(HashAlgorithm::from(r.read_byte()?)
              .to_item("Hash algorithm", debug));
    item.push(Item::new("Hash left 2 bytes").dump(hex::dump(r.read(2)?)));
    mpis::signature(pk_algo, r, cx, item)
}

fn decode_v4(r: &mut Reader, cx: &mut Context, item: &mut Item)
             -> Result<()> {
    let debug = cx.options().get_debug();

    item.push(SignatureType::from(r.read_byte()?)
              .to_item("Signature type", debug));
    let pk_algo = PublicKeyAlgorithm::from(r.read_byte()?);
    item.push(pk_algo.to_item("Public-key algorithm", debug));
    item.push(HashAlgorithm::from(r.read_byte()?)
              .to_item("Hash algorithm", debug));

    // Problems inside the subpacket areas are reported after the
    // rest of the signature has been decoded.
    let mut deferred = None;
    for name in &["Hashed Subpacket", "Unhashed Subpacket"] {
        let len = r.read_be_u16()? as usize;
        let mut area = r.sub_reader(len)?;
        let result = item.push_with(
            Item::new(*name).note(format!("{} bytes", len)),
            |area_item| subpacket::decode_area(Tag::Signature, &mut area,
                                               cx, area_item));
        if let Err(e) = result {
            deferred.get_or_insert(e);
        }
    }

    item.push(Item::new("Hash left 2 bytes").dump(hex::dump(r.read(2)?)));
    mpis::signature(pk_algo, r, cx, item)?;

    match deferred {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
