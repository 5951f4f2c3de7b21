use crate::Item;
use super::{bitfield_items, FlagDescription};

/// Describes preferences regarding key servers.
///
/// See [Section 5.2.3.17 of RFC 4880].
///
///   [Section 5.2.3.17 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.17
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyServerPreferences(Box<[u8]>);

impl KeyServerPreferences {
    /// Creates a new instance from `bits`.
    pub fn new<B: AsRef<[u8]>>(bits: B) -> Self {
        KeyServerPreferences(Vec::from(bits.as_ref()).into_boxed_slice())
    }

    /// Describes every flag.
    pub fn to_items(&self) -> Vec<Item> {
        bitfield_items(&self.0, PREFERENCES)
    }
}

/// The key holder requests that this key only be modified or updated
/// by the key holder or an administrator of the key server.
const KEYSERVER_PREFERENCE_NO_MODIFY: u8 = 0x80;

const PREFERENCES: &[FlagDescription] = &[
    (0, KEYSERVER_PREFERENCE_NO_MODIFY, "No-modify"),
];
