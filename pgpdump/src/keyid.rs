use std::fmt;

use crate::{Reader, Result};
use crate::fmt::hex;

/// A short identifier for certificates and keys.
///
/// A `KeyID` is the low 8 octets of a fingerprint.  It is rendered
/// as `0x` followed by 16 lowercase hexadecimal digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyID([u8; 8]);

impl fmt::Display for KeyID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for KeyID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("KeyID")
            .field(&self.to_string())
            .finish()
    }
}

impl From<u64> for KeyID {
    fn from(data: u64) -> Self {
        KeyID(data.to_be_bytes())
    }
}

impl From<KeyID> for u64 {
    fn from(id: KeyID) -> Self {
        u64::from_be_bytes(id.0)
    }
}

impl KeyID {
    /// Reads a binary key ID.
    pub fn from_reader(r: &mut Reader) -> Result<KeyID> {
        let mut keyid = [0u8; 8];
        keyid.copy_from_slice(r.read(8)?);
        Ok(KeyID(keyid))
    }

    /// Returns whether this is the wildcard key ID.
    ///
    /// An all-zero key ID is used by anonymous recipients.
    pub fn is_wildcard(&self) -> bool {
        self.0 == [0; 8]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    quickcheck::quickcheck! {
        fn hex_formatting(x: u64) -> bool {
            let id = KeyID::from(x);
            id.to_string() == format!("0x{:016x}", x)
                && u64::from(id) == x
        }
    }

    #[test]
    fn read() {
        let data = [0xb4, 0xda, 0x3b, 0xae, 0x7e, 0x20, 0xb8, 0x1c, 0xff];
        let mut r = Reader::new(&data[..]);
        let id = KeyID::from_reader(&mut r).unwrap();
        assert_eq!(id.to_string(), "0xb4da3bae7e20b81c");
        assert_eq!(r.remaining(), 1);
        assert!(KeyID::from_reader(&mut r).is_err());
        assert!(KeyID::from(0).is_wildcard());
    }
}
