//! Packets with reserved, private, or unknown tags.

use crate::{Item, Reader, Result};
use crate::parse::Context;
use crate::types::Tag;

/// Dumps the body on the packet's item.
///
/// Private packets are only dumped if requested.
pub(crate) fn decode(tag: Tag, r: &mut Reader, cx: &mut Context,
                     item: &mut Item) -> Result<()> {
    let show = match tag {
        Tag::Private(_) => cx.options().get_private(),
        _ => true,
    };
    if show {
        item.set_dump(r.peek_hex_dump(r.offset()));
    }
    r.read_to_end();
    Ok(())
}
