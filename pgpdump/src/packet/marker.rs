//! Marker packets.
//!
//! See [Section 5.8 of RFC 4880].  The body should be "PGP".
//!
//!   [Section 5.8 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.8

use crate::{Item, Reader, Result};
use crate::packet::opaque_item;
use crate::parse::Context;

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let body = r.read_to_end();
    item.push(opaque_item("Marker", body, cx.options().get_marker())
              .value(String::from_utf8_lossy(body)));
    Ok(())
}
