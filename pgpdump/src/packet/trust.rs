//! Trust packets.
//!
//! See [Section 5.10 of RFC 4880].  The content is implementation
//! defined.
//!
//!   [Section 5.10 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.10

use crate::{Item, Reader, Result};
use crate::packet::opaque_item;
use crate::parse::Context;

pub(crate) fn decode(r: &mut Reader, _cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    item.push(opaque_item("Trust", r.read_to_end(), true));
    Ok(())
}
