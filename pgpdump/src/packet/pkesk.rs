//! Public-Key Encrypted Session Key packets.
//!
//! See [Section 5.1 of RFC 4880].
//!
//!   [Section 5.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.1

use crate::{Item, KeyID, Reader, Result};
use crate::mpis;
use crate::packet::version_item;
use crate::parse::{Context, EncryptionMode};
use crate::types::{CodedEnum, PublicKeyAlgorithm};

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    cx.set_mode(EncryptionMode::PublicKeyKnown);

    let version = r.read_byte()?;
    item.push(version_item(version, 3));
    if version != 3 {
        return Ok(());
    }

    let keyid = KeyID::from_reader(r)?;
    let keyid_item = Item::new("Key ID").value(keyid.to_string());
    item.push(if keyid.is_wildcard() {
        keyid_item.note("wildcard")
    } else {
        keyid_item
    });

    let algo = PublicKeyAlgorithm::from(r.read_byte()?);
    item.push(algo.to_item("Public-key algorithm", cx.options().get_debug()));
    mpis::session_key(algo, r, cx, item)
}
