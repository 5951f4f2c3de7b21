//! User ID packets.
//!
//! See [Section 5.11 of RFC 4880].
//!
//!   [Section 5.11 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.11

use crate::{Item, Reader, Result};
use crate::fmt::hex;
use crate::parse::Context;

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let userid = r.read_to_end();
    item.push(Item::new("User ID")
              .value(String::from_utf8_lossy(userid))
              .dump_if(cx.options().get_debug(), hex::dump(userid)));
    Ok(())
}
