use std::fmt;

/// The class octet of a revocation key subpacket.
///
/// See [Section 5.2.3.15 of RFC 4880].  The most significant bit must
/// be set, bit 0x40 marks the relation between revoker and revokee as
/// sensitive.
///
///   [Section 5.2.3.15 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.15
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RevocationKey(u8);

impl From<u8> for RevocationKey {
    fn from(class: u8) -> Self {
        RevocationKey(class)
    }
}

impl RevocationKey {
    /// Returns whether the class is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0 & REVOCATION_KEY_FLAG_MUST_BE_SET != 0
    }

    /// Returns whether the relation between revoker and revokee is
    /// of a sensitive nature.
    pub fn sensitive(&self) -> bool {
        self.is_valid() && self.0 & REVOCATION_KEY_FLAG_SENSITIVE != 0
    }
}

impl fmt::Display for RevocationKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = if self.sensitive() {
            "Sensitive"
        } else if self.is_valid() {
            "Normal"
        } else {
            "Unknown"
        };
        write!(f, "{} (0x{:02x})", name, self.0)
    }
}

/// This bit must be set.
const REVOCATION_KEY_FLAG_MUST_BE_SET: u8 = 0x80;

/// Relation is sensitive.
const REVOCATION_KEY_FLAG_SENSITIVE: u8 = 0x40;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classes() {
        assert_eq!(RevocationKey::from(0x80).to_string(), "Normal (0x80)");
        assert_eq!(RevocationKey::from(0xc0).to_string(), "Sensitive (0xc0)");
        assert_eq!(RevocationKey::from(0x40).to_string(), "Unknown (0x40)");
        assert_eq!(RevocationKey::from(0x00).to_string(), "Unknown (0x00)");
        assert_eq!(RevocationKey::from(0xff).to_string(), "Sensitive (0xff)");
    }
}
