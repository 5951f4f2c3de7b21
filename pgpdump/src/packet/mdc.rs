//! Modification Detection Code packets.
//!
//! See [Section 5.14 of RFC 4880].
//!
//!   [Section 5.14 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.14

use crate::{Item, Reader, Result};
use crate::fmt::hex;
use crate::parse::Context;

/// The MDC is a SHA-1 hash.
const MDC_SIZE: usize = 20;

pub(crate) fn decode(r: &mut Reader, _cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    item.push(Item::new("MDC")
              .note(format!("{} bytes", MDC_SIZE))
              .dump(hex::dump(r.read(MDC_SIZE)?)));
    Ok(())
}
