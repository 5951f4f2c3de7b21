//! One-Pass Signature packets.
//!
//! See [Section 5.4 of RFC 4880].
//!
//!   [Section 5.4 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.4

use crate::{Item, KeyID, Reader, Result};
use crate::packet::version_item;
use crate::parse::Context;
use crate::types::{CodedEnum, HashAlgorithm, PublicKeyAlgorithm, SignatureType};

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let debug = cx.options().get_debug();

    let version = r.read_byte()?;
    item.push(version_item(version, 3));
    if version != 3 {
        return Ok(());
    }

    item.push(SignatureType::from(r.read_byte()?)
              .to_item("Signature type", debug));
    item.push(HashAlgorithm::from(r.read_byte()?)
              .to_item("Hash algorithm", debug));
    item.push(PublicKeyAlgorithm::from(r.read_byte()?)
              .to_item("Public-key algorithm", debug));
    let keyid = KeyID::from_reader(r)?;
    item.push(Item::new("Key ID").value(keyid.to_string()));

    // Zero means another one-pass signature over the same data
    // follows.
    let last = r.read_byte()?;
    item.push(Item::new("Nested")
              .value(if last == 0 { "another one pass signature follows" }
                     else { "last one pass signature" })
              .note(format!("flag 0x{:02x}", last)));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Options;

    #[test]
    fn decode_ops() {
        let mut cx = Context::new(Options::default());
        let mut item = Item::new("One-Pass Signature Packet (tag 4)");
        let body = [0x03, 0x00, 0x08, 0x16,
                    0xb4, 0xda, 0x3b, 0xae, 0x7e, 0x20, 0xb8, 0x1c, 0x01];
        decode(&mut Reader::new(&body), &mut cx, &mut item).unwrap();
        let c = item.children();
        assert_eq!(c[1].get_value(), Some("Signature of a binary document (0x00)"));
        assert_eq!(c[2].get_value(), Some("SHA256 (hash 8)"));
        assert_eq!(c[3].get_value(), Some("EdDSA public key algorithm (pub 22)"));
        assert_eq!(c[4].get_value(), Some("0xb4da3bae7e20b81c"));
        assert_eq!(c[5].get_value(), Some("last one pass signature"));
    }
}
