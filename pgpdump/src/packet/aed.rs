//! AEAD Encrypted Data packets.
//!
//! See [Section 5.16 of RFC 4880bis].
//!
//!   [Section 5.16 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.16

use crate::{Error, Item, Reader, Result};
use crate::fmt::hex;
use crate::packet::{sed, version_item};
use crate::parse::Context;
use crate::types::{AEADAlgorithm, CodedEnum, SymmetricAlgorithm};

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let debug = cx.options().get_debug();
    // Consume the encryption mode up front, whatever happens below.
    let mode = cx.take_mode();

    let version = r.read_byte()?;
    item.push(version_item(version, 1));
    if version != 1 {
        return Ok(());
    }

    item.push(SymmetricAlgorithm::from(r.read_byte()?)
              .to_item("Symmetric Algorithm", debug));
    let aead = AEADAlgorithm::from(r.read_byte()?);
    item.push(aead.to_item("AEAD Algorithm", debug));

    let c = r.read_byte()?;
    let chunk = Item::new("Chunk size").note(format!("coded: 0x{:02x}", c));
    item.push(match 1u64.checked_shl(c as u32 + 6) {
        Some(size) => chunk.value(format!("{} bytes", size)),
        None => chunk.value("too large"),
    });

    let iv_size = aead.iv_size().ok_or_else(|| Error::MalformedPacket(
        format!("Unknown IV size for {}", aead)))?;
    item.push(Item::new("IV").dump(hex::dump(r.read(iv_size)?)));

    cx.set_mode(mode);
    item.push(sed::encrypted_data(r, cx));
    Ok(())
}
