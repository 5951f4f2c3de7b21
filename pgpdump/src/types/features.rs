use crate::Item;
use super::{bitfield_items, FlagDescription};

/// Describes features supported by an OpenPGP implementation.
///
/// See [Section 5.2.3.24 of RFC 4880] and [Section 5.2.3.25 of RFC
/// 4880bis].
///
///   [Section 5.2.3.24 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.24
///   [Section 5.2.3.25 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.2.3.25
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Features(Box<[u8]>);

impl Features {
    /// Creates a new instance from `bits`.
    pub fn new<B: AsRef<[u8]>>(bits: B) -> Self {
        Features(Vec::from(bits.as_ref()).into_boxed_slice())
    }

    /// Describes every flag.
    pub fn to_items(&self) -> Vec<Item> {
        bitfield_items(&self.0, FEATURES)
    }
}

/// Modification Detection (packets 18 and 19).
const FEATURE_FLAG_MDC: u8 = 0x01;

/// AEAD Encrypted Data Packet (packet 20) and version 5 Symmetric-Key
/// Encrypted Session Key Packets (packet 3).
const FEATURE_FLAG_AEAD: u8 = 0x02;

/// Version 5 Public-Key Packet format and corresponding new
/// fingerprint format.
const FEATURE_FLAG_V5_KEYS: u8 = 0x04;

const FEATURES: &[FlagDescription] = &[
    (0, FEATURE_FLAG_MDC, "Modification Detection (packets 18 and 19)"),
    (0, FEATURE_FLAG_AEAD,
     "AEAD Encrypted Data Packet (packet 20) and version 5 \
      Symmetric-Key Encrypted Session Key Packets (packet 3)"),
    (0, FEATURE_FLAG_V5_KEYS,
     "Version 5 Public-Key Packet format and corresponding new \
      fingerprint format"),
];
