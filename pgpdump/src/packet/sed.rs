//! Symmetrically Encrypted Data packets.
//!
//! See [Section 5.7 of RFC 4880].
//!
//!   [Section 5.7 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.7

use crate::{Item, Reader, Result};
use crate::parse::{Context, EncryptionMode};

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    item.push(encrypted_data(r, cx));
    Ok(())
}

/// Describes the encrypted payload of an encrypted data packet.
///
/// Which session key packet preceded the packet determines where the
/// symmetric algorithm is specified.  The encryption mode is reset.
pub(super) fn encrypted_data(r: &mut Reader, cx: &mut Context) -> Item {
    let origin = match cx.take_mode() {
        EncryptionMode::SymmetricKeyKnown =>
            "sym alg is specified in sym-key encrypted session key",
        EncryptionMode::PublicKeyKnown =>
            "sym alg is specified in pub-key encrypted session key",
        EncryptionMode::NotSpecified =>
            "sym alg is IDEA, simple string-to-key",
    };
    let data = r.read_to_end();
    Item::new("Encrypted data")
        .note(format!("{}; {} bytes", origin, data.len()))
}
