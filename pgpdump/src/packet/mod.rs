//! Packet decoders.
//!
//! Every packet is decoded into an [`Item`] tree.  The root item is
//! named after the packet's tag and carries the body length as note.
//! Its children are the packet's fields in wire order.
//!
//! Decoding is best effort: if a field cannot be decoded, the fields
//! decoded so far are retained and the error is returned alongside
//! the tree.
//!
//!   [`Item`]: ../struct.Item.html

use anyhow::Context as _;

use crate::{Item, Reader, Result};
use crate::parse::Context;
use crate::types::{CodedEnum, Tag};

pub mod header;
use self::header::{OpaquePacket, PacketSplitter};

mod aed;
mod compressed_data;
mod key;
mod literal;
mod marker;
mod mdc;
mod one_pass_sig;
mod pkesk;
mod sed;
mod seip;
pub(crate) mod signature;
mod skesk;
mod trust;
mod unknown;
mod user_attribute;
mod userid;

/// Decodes a framed packet.
///
/// Returns the packet's item tree and the outcome.  The tree is
/// returned even if decoding failed.
pub fn decode(packet: &OpaquePacket, cx: &mut Context) -> (Item, Result<()>) {
    let tag = packet.tag();
    let body = packet.body();
    log::debug!("Decoding {} ({} bytes) at depth {}",
                tag, body.len(), cx.depth());

    let mut item = Item::new(tag.label())
        .note(format!("{} bytes", body.len()));
    let mut r = Reader::new(body);
    let result = dispatch(tag, &mut r, cx, &mut item)
        .with_context(|| format!("Decoding {}", tag.label()));

    if result.is_ok() && ! r.is_empty() {
        log::debug!("{}: {} trailing bytes ignored", tag, r.remaining());
    }
    (item, result)
}

/// Decodes `body` according to `tag`, appending the fields to
/// `item`.
pub(crate) fn dispatch(tag: Tag, r: &mut Reader, cx: &mut Context,
                       item: &mut Item) -> Result<()> {
    match tag {
        Tag::PKESK => pkesk::decode(r, cx, item),
        Tag::Signature => signature::decode(r, cx, item),
        Tag::SKESK => skesk::decode(r, cx, item),
        Tag::OnePassSig => one_pass_sig::decode(r, cx, item),
        Tag::SecretKey => key::decode_secret(r, cx, item),
        Tag::PublicKey => key::decode_public(r, cx, item),
        // Subkeys share the layout of primary keys.
        Tag::SecretSubkey =>
            cx.nested(|cx| dispatch(Tag::SecretKey, r, cx, item)),
        Tag::PublicSubkey =>
            cx.nested(|cx| dispatch(Tag::PublicKey, r, cx, item)),
        Tag::CompressedData => compressed_data::decode(r, cx, item),
        Tag::SED => sed::decode(r, cx, item),
        Tag::Marker => marker::decode(r, cx, item),
        Tag::Literal => literal::decode(r, cx, item),
        Tag::Trust => trust::decode(r, cx, item),
        Tag::UserID => userid::decode(r, cx, item),
        Tag::UserAttribute => user_attribute::decode(r, cx, item),
        Tag::SEIP => seip::decode(r, cx, item),
        Tag::MDC => mdc::decode(r, cx, item),
        Tag::AED => aed::decode(r, cx, item),
        Tag::Reserved | Tag::Private(_) | Tag::Unknown(_) =>
            unknown::decode(tag, r, cx, item),
    }
}

/// Decodes a packet stream nested inside another packet.
///
/// The packets are appended to `parent`.  Decoding continues after a
/// packet fails, the first error is returned once the stream is
/// exhausted.  A framing error ends the stream.
pub(crate) fn decode_stream(data: &[u8], cx: &mut Context, parent: &mut Item)
                            -> Result<()> {
    let mut first_error = None;
    for packet in PacketSplitter::new(data) {
        let packet = match packet {
            Ok(packet) => packet,
            Err(e) => {
                first_error.get_or_insert(e);
                break;
            },
        };

        let (item, result) = decode(&packet, cx);
        parent.push(item);
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Describes a version octet.
///
/// `current` is the version defined by RFC 4880.  The next version
/// is the one proposed by RFC 4880bis.
pub(crate) fn version_item(version: u8, current: u8) -> Item {
    let note = if version == current {
        "current"
    } else if version > 0 && version < current {
        "old"
    } else if version as u16 == current as u16 + 1 {
        "draft"
    } else {
        "unknown"
    };
    Item::new("Version").value(version.to_string()).note(note)
}

/// Describes an opaque run of octets.
fn opaque_item(name: &str, data: &[u8], show: bool) -> Item {
    Item::new(name)
        .note(format!("{} bytes", data.len()))
        .dump_if(show, crate::fmt::hex::dump(data))
}
