use crate::Item;
use super::{bitfield_items, FlagDescription};

/// Describes how a key may be used, and stores additional
/// information.
///
/// See [Section 5.2.3.21 of RFC 4880].
///
///   [Section 5.2.3.21 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.21
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyFlags(Box<[u8]>);

impl KeyFlags {
    /// Creates a new instance from `bits`.
    pub fn new<B: AsRef<[u8]>>(bits: B) -> Self {
        KeyFlags(Vec::from(bits.as_ref()).into_boxed_slice())
    }

    /// Describes every flag.
    pub fn to_items(&self) -> Vec<Item> {
        bitfield_items(&self.0, KEY_FLAGS)
    }
}

/// Models key flag 0x01.
const KEY_FLAG_CERTIFY: u8 = 0x01;
/// Models key flag 0x02.
const KEY_FLAG_SIGN: u8 = 0x02;
/// Models key flag 0x04.
const KEY_FLAG_ENCRYPT_FOR_TRANSPORT: u8 = 0x04;
/// Models key flag 0x08.
const KEY_FLAG_ENCRYPT_AT_REST: u8 = 0x08;
/// Models key flag 0x10.
const KEY_FLAG_SPLIT_KEY: u8 = 0x10;
/// Models key flag 0x20.
const KEY_FLAG_AUTHENTICATE: u8 = 0x20;
/// Models key flag 0x80.
const KEY_FLAG_GROUP_KEY: u8 = 0x80;

const KEY_FLAGS: &[FlagDescription] = &[
    (0, KEY_FLAG_CERTIFY, "This key may be used to certify other keys."),
    (0, KEY_FLAG_SIGN, "This key may be used to sign data."),
    (0, KEY_FLAG_ENCRYPT_FOR_TRANSPORT,
     "This key may be used to encrypt communications."),
    (0, KEY_FLAG_ENCRYPT_AT_REST, "This key may be used to encrypt storage."),
    (0, KEY_FLAG_SPLIT_KEY,
     "The private component of this key may have been split \
      by a secret-sharing mechanism."),
    (0, KEY_FLAG_AUTHENTICATE, "This key may be used for authentication."),
    (0, KEY_FLAG_GROUP_KEY,
     "The private component of this key may be in the possession \
      of more than one person."),
];
