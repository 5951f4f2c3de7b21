//! Symmetrically Encrypted Integrity Protected Data packets.
//!
//! See [Section 5.13 of RFC 4880].
//!
//!   [Section 5.13 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.13

use crate::{Item, Reader, Result};
use crate::packet::{sed, version_item};
use crate::parse::Context;

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let version = r.read_byte();
    // The packet consumes the session key even if it is malformed.
    let data = sed::encrypted_data(r, cx);
    item.push(version_item(version?, 1));
    item.push(data);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Options;
    use crate::parse::EncryptionMode;

    #[test]
    fn decode_seip() {
        let mut cx = Context::new(Options::default());
        cx.set_mode(EncryptionMode::PublicKeyKnown);
        let mut item = Item::new("Sym. Encrypted and Integrity Protected Data Packet (tag 18)");
        decode(&mut Reader::new(&[0x01, 0xaa, 0xbb]), &mut cx, &mut item)
            .unwrap();
        assert_eq!(item.children()[0].get_note(), Some("current"));
        assert_eq!(item.children()[1].get_note(),
                   Some("sym alg is specified in pub-key encrypted session key; \
                         2 bytes"));
        assert_eq!(cx.mode(), EncryptionMode::NotSpecified);
    }

    #[test]
    fn empty() {
        let mut cx = Context::new(Options::default());
        cx.set_mode(EncryptionMode::PublicKeyKnown);
        let mut item = Item::new("Sym. Encrypted and Integrity Protected Data Packet (tag 18)");
        assert!(decode(&mut Reader::new(&[]), &mut cx, &mut item).is_err());
        assert_eq!(cx.mode(), EncryptionMode::NotSpecified);
    }
}
