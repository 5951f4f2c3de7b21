//! Literal Data packets.
//!
//! See [Section 5.9 of RFC 4880].
//!
//!   [Section 5.9 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.9

use crate::{Item, Reader, Result};
use crate::fmt::hex;
use crate::packet::opaque_item;
use crate::parse::Context;
use crate::types::Timestamp;

/// Rendered in place of an empty file name or a zero time.
const NULL: &str = "null";

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let format = r.read_byte()?;
    let name = match format {
        b'b' => "binary",
        b't' => "text",
        b'u' => "UTF-8 text",
        b'm' => "MIME",
        b'l' | b'1' => "local",
        _ => "unknown",
    };
    item.push(Item::new("Literal data format")
              .value(format!("{} ({})", name,
                             if format.is_ascii_graphic() {
                                 (format as char).to_string()
                             } else {
                                 format!("0x{:02x}", format)
                             })));

    let len = r.read_byte()? as usize;
    let filename = r.read(len)?;
    item.push(Item::new("File name")
              .value(if filename.is_empty() { NULL.into() }
                     else { String::from_utf8_lossy(filename).into_owned() })
              .dump_if(cx.options().get_debug() && ! filename.is_empty(),
                       hex::dump(filename)));

    let t = Timestamp::from(r.read_be_u32()?);
    item.push(if t.is_zero() {
        Item::new("Modification time of a file").value(NULL)
    } else {
        cx.time_item("Modification time of a file", t)
    });

    item.push(opaque_item("Literal data", r.read_to_end(),
                          cx.options().get_literal()));
    Ok(())
}
