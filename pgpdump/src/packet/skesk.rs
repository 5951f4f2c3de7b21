//! Symmetric-Key Encrypted Session Key packets.
//!
//! See [Section 5.3 of RFC 4880] and, for version 5, [Section 5.3 of
//! RFC 4880bis].
//!
//!   [Section 5.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.3
//!   [Section 5.3 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.3

use crate::{Error, Item, Reader, Result};
use crate::fmt::hex;
use crate::packet::{opaque_item, version_item};
use crate::parse::{Context, EncryptionMode};
use crate::s2k;
use crate::types::{AEADAlgorithm, CodedEnum, SymmetricAlgorithm};

/// Size of the authentication tag of version 5 packets.
const AEAD_TAG_SIZE: usize = 16;

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    cx.set_mode(EncryptionMode::SymmetricKeyKnown);
    let debug = cx.options().get_debug();

    let version = r.read_byte()?;
    item.push(version_item(version, 4));
    match version {
        4 => {
            item.push(SymmetricAlgorithm::from(r.read_byte()?)
                      .to_item("Symmetric Algorithm", debug));
            s2k::decode(r, cx, item)?;
            let esk = r.read_to_end();
            if ! esk.is_empty() {
                item.push(opaque_item("Encrypted session key", esk, true));
            }
        },
        5 => {
            item.push(SymmetricAlgorithm::from(r.read_byte()?)
                      .to_item("Symmetric Algorithm", debug));
            let aead = AEADAlgorithm::from(r.read_byte()?);
            item.push(aead.to_item("AEAD Algorithm", debug));
            s2k::decode(r, cx, item)?;

            let iv_size = aead.iv_size().ok_or_else(|| Error::MalformedPacket(
                format!("Unknown IV size for {}", aead)))?;
            item.push(Item::new("IV").dump(hex::dump(r.read(iv_size)?)));

            let esk_len = r.remaining().checked_sub(AEAD_TAG_SIZE)
                .ok_or(Error::UnexpectedEof)?;
            item.push(opaque_item("Encrypted session key", r.read(esk_len)?,
                                  true));
            item.push(Item::new("Authentication tag")
                      .dump(hex::dump(r.read(AEAD_TAG_SIZE)?)));
        },
        _ => (),
    }
    Ok(())
}
