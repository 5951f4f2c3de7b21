//! User Attribute packets.
//!
//! See [Section 5.12 of RFC 4880].  The body is a sequence of
//! subpackets.
//!
//!   [Section 5.12 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12

use crate::{Item, Reader, Result};
use crate::parse::Context;
use crate::subpacket;
use crate::types::Tag;

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    subpacket::decode_area(Tag::UserAttribute, r, cx, item)
}
