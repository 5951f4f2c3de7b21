//! Primitive types.
//!
//! This module provides types used in OpenPGP, like enumerations
//! describing algorithms.
//!
//! Most identifiers in OpenPGP are single octets drawn from a
//! registry.  All of them are modelled the same way: a variant for
//! every registered value, `Private(u8)` for the band reserved for
//! private or experimental use, and `Unknown(u8)` for everything
//! else.  They all implement [`CodedEnum`], which knows how to render
//! the value, e.g. `"SHA256 (hash 8)"`.
//!
//!   [`CodedEnum`]: trait.CodedEnum.html

use std::fmt;

use crate::Item;
use crate::fmt::hex;

mod features;
pub use self::features::Features;
mod key_flags;
pub use self::key_flags::KeyFlags;
mod revocation_key;
pub use self::revocation_key::RevocationKey;
mod server_preferences;
pub use self::server_preferences::KeyServerPreferences;
mod timestamp;
pub use self::timestamp::{Timestamp, Duration};
pub(crate) use self::timestamp::format_seconds;

/// A one-octet identifier drawn from a registry.
pub trait CodedEnum: Copy + From<u8> + Into<u8> {
    /// Labels the numeric value when rendering, e.g. `"pub"`.
    const UNIT: &'static str;

    /// Name of values in the private or experimental band.
    const PRIVATE: &'static str = "Private/Experimental algorithm";

    /// Name of unassigned values.
    const UNKNOWN: &'static str = "Unknown";

    /// Returns the registered name, if any.
    fn registered_name(&self) -> Option<&'static str>;

    /// Returns whether the value is in the private or experimental
    /// band.
    fn is_private(&self) -> bool;

    /// Returns the numeric value.
    fn code(&self) -> u8 {
        (*self).into()
    }

    /// Renders the numeric value.
    fn render_code(code: u8) -> String {
        format!("{} {}", Self::UNIT, code)
    }

    /// Returns the name, falling back to the private or unknown
    /// label.
    fn name(&self) -> &'static str {
        if self.is_private() {
            Self::PRIVATE
        } else {
            self.registered_name().unwrap_or(Self::UNKNOWN)
        }
    }

    /// Renders the value, e.g. `"ECDSA public key algorithm (pub 19)"`.
    fn label(&self) -> String {
        format!("{} ({})", self.name(), Self::render_code(self.code()))
    }

    /// Converts the value into an item named `name`.
    ///
    /// If `debug` is set, the raw octet is dumped.
    fn to_item(&self, name: &str, debug: bool) -> Item {
        Item::new(name)
            .value(self.label())
            .dump_if(debug, hex::dump(&[self.code()]))
    }
}

macro_rules! coded_enum {
    (
        $(#[$attr:meta])*
        pub enum $name:ident: $unit:expr, private $lo:literal ..= $hi:literal {
            $(
                $(#[$vattr:meta])*
                $code:literal => $variant:ident: $label:expr,
            )*
        }
        $($extra:tt)*
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
        pub enum $name {
            $(
                $(#[$vattr])*
                $variant,
            )*
            /// Private or experimental value.
            Private(u8),
            /// Unassigned value.
            Unknown(u8),
        }

        impl From<u8> for $name {
            fn from(u: u8) -> Self {
                match u {
                    $( $code => $name::$variant, )*
                    $lo..=$hi => $name::Private(u),
                    u => $name::Unknown(u),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(v: $name) -> u8 {
                match v {
                    $( $name::$variant => $code, )*
                    $name::Private(u) | $name::Unknown(u) => u,
                }
            }
        }

        impl CodedEnum for $name {
            const UNIT: &'static str = $unit;

            fn registered_name(&self) -> Option<&'static str> {
                match self {
                    $( $name::$variant => Some($label), )*
                    _ => None,
                }
            }

            fn is_private(&self) -> bool {
                matches!(self, $name::Private(_))
            }

            $($extra)*
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.label())
            }
        }
    };
}

coded_enum! {
    /// The OpenPGP public key algorithms as defined in [Section 9.1 of
    /// RFC 4880], and [Section 5 of RFC 6637].
    ///
    ///   [Section 9.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.1
    ///   [Section 5 of RFC 6637]: https://tools.ietf.org/html/rfc6637
    pub enum PublicKeyAlgorithm: "pub", private 100..=110 {
        /// RSA (Encrypt or Sign)
        1 => RSAEncryptSign: "RSA (Encrypt or Sign)",
        /// RSA Encrypt-Only
        2 => RSAEncrypt: "RSA Encrypt-Only",
        /// RSA Sign-Only
        3 => RSASign: "RSA Sign-Only",
        /// ElGamal (Encrypt-Only)
        16 => ElGamalEncrypt: "Elgamal (Encrypt-Only)",
        /// DSA (Digital Signature Algorithm)
        17 => DSA: "DSA (Digital Signature Algorithm)",
        /// Elliptic curve DH
        18 => ECDH: "ECDH public key algorithm",
        /// Elliptic curve DSA
        19 => ECDSA: "ECDSA public key algorithm",
        /// ElGamal (Encrypt or Sign)
        20 => ElGamalEncryptSign: "Reserved (formerly Elgamal Encrypt or Sign)",
        /// Diffie-Hellman (X9.42)
        21 => DiffieHellman: "Reserved for Diffie-Hellman (X9.42, as defined for IETF-S/MIME)",
        /// "Twisted" Edwards curve DSA
        22 => EdDSA: "EdDSA public key algorithm",
        /// Reserved for AEDH
        23 => AEDH: "Reserved for AEDH",
        /// Reserved for AEDSA
        24 => AEDSA: "Reserved for AEDSA",
    }
}

coded_enum! {
    /// The symmetric-key algorithms as defined in [Section 9.2 of RFC 4880].
    ///
    ///   [Section 9.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.2
    pub enum SymmetricAlgorithm: "sym", private 100..=110 {
        /// Null encryption.
        0 => Unencrypted: "Plaintext or unencrypted data",
        /// IDEA block cipher.
        1 => IDEA: "IDEA",
        /// 3-DES in EDE configuration.
        2 => TripleDES: "TripleDES (DES-EDE, 168 bit key derived from 192)",
        /// CAST5/CAST128 block cipher.
        3 => CAST5: "CAST5 (128 bit key, as per [RFC2144])",
        /// Schneier et.al. Blowfish block cipher.
        4 => Blowfish: "Blowfish (128 bit key, 16 rounds)",
        /// 10-round AES.
        7 => AES128: "AES with 128-bit key",
        /// 12-round AES.
        8 => AES192: "AES with 192-bit key",
        /// 14-round AES.
        9 => AES256: "AES with 256-bit key",
        /// Twofish block cipher.
        10 => Twofish: "Twofish with 256-bit key",
        /// 18 rounds of NESSIEs Camellia.
        11 => Camellia128: "Camellia with 128-bit key",
        /// 24 rounds of NESSIEs Camellia w/192 bit keys.
        12 => Camellia192: "Camellia with 192-bit key",
        /// 24 rounds of NESSIEs Camellia w/256 bit keys.
        13 => Camellia256: "Camellia with 256-bit key",
    }
}

impl SymmetricAlgorithm {
    /// Returns the block size of the cipher in bytes.
    ///
    /// This is also the size of the IV used with the cipher.  Returns
    /// `None` for unknown ciphers and for the null cipher.
    pub fn block_size(&self) -> Option<usize> {
        use self::SymmetricAlgorithm::*;
        match self {
            IDEA | TripleDES | CAST5 | Blowfish => Some(8),
            AES128 | AES192 | AES256 | Twofish
                | Camellia128 | Camellia192 | Camellia256 => Some(16),
            Unencrypted | Private(_) | Unknown(_) => None,
        }
    }
}

coded_enum! {
    /// The OpenPGP hash algorithms as defined in [Section 9.4 of RFC 4880].
    ///
    ///   [Section 9.4 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.4
    pub enum HashAlgorithm: "hash", private 100..=110 {
        /// Rivest et.al. message digest 5.
        1 => MD5: "MD5",
        /// NIST Secure Hash Algorithm (deprecated)
        2 => SHA1: "SHA-1",
        /// RIPEMD-160
        3 => RipeMD: "RIPE-MD/160",
        /// 256-bit version of SHA2
        8 => SHA256: "SHA256",
        /// 384-bit version of SHA2
        9 => SHA384: "SHA384",
        /// 512-bit version of SHA2
        10 => SHA512: "SHA512",
        /// 224-bit version of SHA2
        11 => SHA224: "SHA224",
        /// 256-bit version of SHA3
        12 => SHA3_256: "SHA3-256",
        /// 512-bit version of SHA3
        14 => SHA3_512: "SHA3-512",
    }
}

coded_enum! {
    /// The OpenPGP compression algorithms as defined in [Section 9.3 of RFC 4880].
    ///
    ///   [Section 9.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.3
    pub enum CompressionAlgorithm: "comp", private 100..=110 {
        /// Null compression.
        0 => Uncompressed: "Uncompressed",
        /// DEFLATE Compressed Data.
        1 => Zip: "ZIP <RFC1951>",
        /// ZLIB Compressed Data with DEFLATE.
        2 => Zlib: "ZLIB <RFC1950>",
        /// bzip2
        3 => BZip2: "BZip2",
    }
}

coded_enum! {
    /// String-to-Key specifiers as defined in [Section 3.7.1 of RFC 4880].
    ///
    /// Identifier 101 falls into the private band.  GnuPG uses it for
    /// its extensions, see [`S2K`].
    ///
    ///   [Section 3.7.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-3.7.1
    ///   [`S2K`]: ../s2k/enum.S2K.html
    pub enum S2KType: "s2k", private 100..=110 {
        /// Simple S2K.
        0 => Simple: "Simple S2K",
        /// Salted S2K.
        1 => Salted: "Salted S2K",
        /// Reserved.
        2 => Reserved: "Reserved value",
        /// Iterated and Salted S2K.
        3 => Iterated: "Iterated and Salted S2K",
    }
}

coded_enum! {
    /// Signature type as defined in [Section 5.2.1 of RFC 4880].
    ///
    ///   [Section 5.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.1
    pub enum SignatureType: "0x", private 100..=110 {
        /// Signature over a binary document.
        0x00 => Binary: "Signature of a binary document",
        /// Signature over a canonical text document.
        0x01 => Text: "Signature of a canonical text document",
        /// Standalone signature.
        0x02 => Standalone: "Standalone signature",
        /// Generic certification of a User ID and Public-Key packet.
        0x10 => GenericCertification:
            "Generic certification of a User ID and Public-Key packet",
        /// Persona certification of a User ID and Public-Key packet.
        0x11 => PersonaCertification:
            "Persona certification of a User ID and Public-Key packet",
        /// Casual certification of a User ID and Public-Key packet.
        0x12 => CasualCertification:
            "Casual certification of a User ID and Public-Key packet",
        /// Positive certification of a User ID and Public-Key packet.
        0x13 => PositiveCertification:
            "Positive certification of a User ID and Public-Key packet",
        /// Attested key signature.
        0x16 => AttestationKey: "Attested Key Signature",
        /// Subkey Binding Signature
        0x18 => SubkeyBinding: "Subkey Binding Signature",
        /// Primary Key Binding Signature
        0x19 => PrimaryKeyBinding: "Primary Key Binding Signature",
        /// Signature directly on a key
        0x1f => DirectKey: "Signature directly on a key",
        /// Key revocation signature
        0x20 => KeyRevocation: "Key revocation signature",
        /// Subkey revocation signature
        0x28 => SubkeyRevocation: "Subkey revocation signature",
        /// Certification revocation signature
        0x30 => CertificationRevocation: "Certification revocation signature",
        /// Timestamp signature.
        0x40 => Timestamp: "Timestamp signature",
        /// Third-Party Confirmation signature.
        0x50 => Confirmation: "Third-Party Confirmation signature",
    }

    fn render_code(code: u8) -> String {
        format!("0x{:02x}", code)
    }
}

coded_enum! {
    /// The AEAD algorithms as defined in [Section 9.6 of RFC 4880bis].
    ///
    ///   [Section 9.6 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-9.6
    pub enum AEADAlgorithm: "aead", private 100..=110 {
        /// EAX mode.
        1 => EAX: "EAX mode",
        /// OCB mode.
        2 => OCB: "OCB mode",
        /// Galois/Counter mode.
        3 => GCM: "GCM mode",
    }
}

impl AEADAlgorithm {
    /// Returns the size of the initialization vector in bytes.
    pub fn iv_size(&self) -> Option<usize> {
        match self {
            AEADAlgorithm::EAX => Some(16),
            AEADAlgorithm::OCB => Some(15),
            AEADAlgorithm::GCM => Some(12),
            _ => None,
        }
    }
}

coded_enum! {
    /// The OpenPGP packet tags as defined in [Section 4.3 of RFC 4880].
    ///
    ///   [Section 4.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.3
    pub enum Tag: "tag", private 60..=63 {
        /// Reserved Packet tag.
        0 => Reserved: "Reserved",
        /// Public-Key Encrypted Session Key Packet.
        1 => PKESK: "Public-Key Encrypted Session Key Packet",
        /// Signature Packet.
        2 => Signature: "Signature Packet",
        /// Symmetric-Key Encrypted Session Key Packet.
        3 => SKESK: "Symmetric-Key Encrypted Session Key Packet",
        /// One-Pass Signature Packet.
        4 => OnePassSig: "One-Pass Signature Packet",
        /// Secret-Key Packet.
        5 => SecretKey: "Secret-Key Packet",
        /// Public-Key Packet.
        6 => PublicKey: "Public-Key Packet",
        /// Secret-Subkey Packet.
        7 => SecretSubkey: "Secret-Subkey Packet",
        /// Compressed Data Packet.
        8 => CompressedData: "Compressed Data Packet",
        /// Symmetrically Encrypted Data Packet.
        9 => SED: "Symmetrically Encrypted Data Packet",
        /// Marker Packet.
        10 => Marker: "Marker Packet (Obsolete Literal Packet)",
        /// Literal Data Packet.
        11 => Literal: "Literal Data Packet",
        /// Trust Packet.
        12 => Trust: "Trust Packet",
        /// User ID Packet.
        13 => UserID: "User ID Packet",
        /// Public-Subkey Packet.
        14 => PublicSubkey: "Public-Subkey Packet",
        /// User Attribute Packet.
        17 => UserAttribute: "User Attribute Packet",
        /// Sym. Encrypted and Integrity Protected Data Packet.
        18 => SEIP: "Sym. Encrypted and Integrity Protected Data Packet",
        /// Modification Detection Code Packet.
        19 => MDC: "Modification Detection Code Packet",
        /// AEAD Encrypted Data Packet.
        20 => AED: "AEAD Encrypted Data Packet",
    }

    const PRIVATE: &'static str = "Private or Experimental Values";
}

coded_enum! {
    /// Signature subpacket types as defined in [Section 5.2.3.1 of RFC
    /// 4880] and [RFC 4880bis].
    ///
    ///   [Section 5.2.3.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.1
    ///   [RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.2.3.1
    pub enum SubpacketTag: "sub", private 100..=110 {
        /// The time the signature was made.
        2 => SignatureCreationTime: "Signature Creation Time",
        /// The validity period of the signature.
        3 => SignatureExpirationTime: "Signature Expiration Time",
        /// This subpacket denotes whether a certification signature
        /// is "exportable".
        4 => ExportableCertification: "Exportable Certification",
        /// Signer asserts that the key is not only valid but also
        /// trustworthy at the specified level.
        5 => TrustSignature: "Trust Signature",
        /// Used in conjunction with trust Signature packets to limit
        /// the scope of trust.
        6 => RegularExpression: "Regular Expression",
        /// Signature's revocability status.
        7 => Revocable: "Revocable",
        /// The validity period of the key.
        9 => KeyExpirationTime: "Key Expiration Time",
        /// Deprecated.
        10 => PlaceholderForBackwardCompatibility:
            "Placeholder for backward compatibility",
        /// Symmetric algorithm numbers that indicate which algorithms
        /// the key holder prefers to use.
        11 => PreferredSymmetricAlgorithms: "Preferred Symmetric Algorithms",
        /// Authorizes the specified key to issue revocation
        /// signatures for this key.
        12 => RevocationKey: "Revocation Key",
        /// The OpenPGP Key ID of the key issuing the signature.
        16 => Issuer: "Issuer",
        /// This subpacket describes a "notation" on the signature.
        20 => NotationData: "Notation Data",
        /// Message digest algorithm numbers that indicate which
        /// algorithms the key holder prefers to receive.
        21 => PreferredHashAlgorithms: "Preferred Hash Algorithms",
        /// Compression algorithm numbers that indicate which
        /// algorithms the key holder prefers to use.
        22 => PreferredCompressionAlgorithms: "Preferred Compression Algorithms",
        /// Key server preferences.
        23 => KeyServerPreferences: "Key Server Preferences",
        /// The key holder's preferred key server.
        24 => PreferredKeyServer: "Preferred Key Server",
        /// The primary User ID flag.
        25 => PrimaryUserID: "Primary User ID",
        /// The URI of the signer's policy.
        26 => PolicyURI: "Policy URI",
        /// Flags describing the key's capabilities.
        27 => KeyFlags: "Key Flags",
        /// The User ID that is responsible for the signing.
        28 => SignersUserID: "Signer's User ID",
        /// The reason for a revocation.
        29 => ReasonForRevocation: "Reason for Revocation",
        /// The OpenPGP features a user's implementation supports.
        30 => Features: "Features",
        /// A signature to which this signature refers.
        31 => SignatureTarget: "Signature Target",
        /// A complete signature packet body.
        32 => EmbeddedSignature: "Embedded Signature",
        /// The fingerprint of the key issuing the signature.
        33 => IssuerFingerprint: "Issuer Fingerprint",
        /// AEAD algorithm numbers that indicate which algorithms the
        /// key holder prefers to use.
        34 => PreferredAEADAlgorithms: "Preferred AEAD Algorithms",
        /// Who the signed message was intended for.
        35 => IntendedRecipient: "Intended Recipient Fingerprint",
        /// The certifications that the key holder attests to.
        37 => AttestedCertifications: "Attested Certifications",
        /// A key that can be used to verify the signature.
        38 => KeyBlock: "Key Block",
    }
}

coded_enum! {
    /// User attribute subpacket types as defined in [Section 5.12 of
    /// RFC 4880].
    ///
    ///   [Section 5.12 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12
    pub enum UserAttributeSubpacketTag: "sub", private 100..=110 {
        /// An image.
        1 => Image: "Image Attribute",
    }
}

coded_enum! {
    /// Describes the reason for a revocation, see [Section 5.2.3.23
    /// of RFC 4880].
    ///
    ///   [Section 5.2.3.23 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.23
    pub enum ReasonForRevocation: "", private 100..=110 {
        /// No reason specified (key revocations or cert revocations)
        0 => Unspecified: "No reason specified",
        /// Key is superseded (key revocations)
        1 => KeySuperseded: "Key is superseded",
        /// Key material has been compromised (key revocations)
        2 => KeyCompromised: "Key material has been compromised",
        /// Key is retired and no longer used (key revocations)
        3 => KeyRetired: "Key is retired and no longer used",
        /// User ID information is no longer valid (cert revocations)
        32 => UIDRetired: "User ID information is no longer valid",
    }

    const PRIVATE: &'static str = "Private Use";
    const UNKNOWN: &'static str = "Unknown reason";

    fn render_code(code: u8) -> String {
        code.to_string()
    }
}

/// A flag defined in a bitfield: the octet, the mask, and what it
/// means.
pub(crate) type FlagDescription = (usize, u8, &'static str);

/// Describes every defined flag of a bitfield, followed by the bits
/// that are set but not defined.
///
/// Defined flags are named `"Flag"` and noted as `"set"` or
/// `"unset"`.  Undefined bits are never dropped silently, each one
/// yields an `"Unknown flag"` item.
pub(crate) fn bitfield_items(bits: &[u8], defined: &[FlagDescription])
                             -> Vec<Item>
{
    let mut items: Vec<Item> = defined.iter()
        .map(|&(octet, mask, description)| {
            let set = bits.get(octet).map(|b| b & mask != 0).unwrap_or(false);
            Item::new("Flag")
                .value(description)
                .note(if set { "set" } else { "unset" })
        })
        .collect();

    for (octet, b) in bits.iter().enumerate() {
        let known = defined.iter()
            .filter(|&&(o, _, _)| o == octet)
            .fold(0u8, |acc, &(_, mask, _)| acc | mask);
        for bit in 0..8 {
            let mask = 0x80u8 >> bit;
            if b & mask != 0 && known & mask == 0 {
                items.push(Item::new("Unknown flag")
                           .value(format!("0x{:02x}", mask))
                           .note(format!("octet {}", octet)));
            }
        }
    }

    items
}

/// Elliptic curves used in OpenPGP.
///
/// `PublicKeyAlgorithm` does not differentiate between elliptic
/// curves.  Instead, the curve is specified using an OID prepended to
/// the key material.  Only exact matches are recognized.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Curve {
    /// NIST curve P-256.
    NistP256,
    /// NIST curve P-384.
    NistP384,
    /// NIST curve P-521.
    NistP521,
    /// brainpoolP256r1.
    BrainpoolP256,
    /// brainpoolP384r1.
    BrainpoolP384,
    /// brainpoolP512r1.
    BrainpoolP512,
    /// D.J. Bernstein's "Twisted" Edwards curve Ed25519.
    Ed25519,
    /// Elliptic curve Diffie-Hellman using D.J. Bernstein's Curve25519.
    Cv25519,
    /// The Koblitz curve used by Bitcoin.
    Secp256k1,
    /// Unknown curve.
    Unknown(Box<[u8]>),
}

const NIST_P256_OID: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];
const NIST_P384_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x22];
const NIST_P521_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x23];
const BRAINPOOL_P256_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x07];
const BRAINPOOL_P384_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0B];
const BRAINPOOL_P512_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0D];
const ED25519_OID: &[u8] =
    &[0x2B, 0x06, 0x01, 0x04, 0x01, 0xDA, 0x47, 0x0F, 0x01];
const CV25519_OID: &[u8] =
    &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x97, 0x55, 0x01, 0x05, 0x01];
const SECP256K1_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x0A];

impl Curve {
    /// Parses the given OID.
    pub fn from_oid(oid: &[u8]) -> Curve {
        // Match on OIDs, see section 11 of RFC6637.
        match oid {
            NIST_P256_OID => Curve::NistP256,
            NIST_P384_OID => Curve::NistP384,
            NIST_P521_OID => Curve::NistP521,
            BRAINPOOL_P256_OID => Curve::BrainpoolP256,
            BRAINPOOL_P384_OID => Curve::BrainpoolP384,
            BRAINPOOL_P512_OID => Curve::BrainpoolP512,
            ED25519_OID => Curve::Ed25519,
            CV25519_OID => Curve::Cv25519,
            SECP256K1_OID => Curve::Secp256k1,
            oid => Curve::Unknown(Vec::from(oid).into_boxed_slice()),
        }
    }

    /// Returns the curve's name as used by GnuPG.
    pub fn name(&self) -> Option<&'static str> {
        use self::Curve::*;
        match self {
            NistP256 => Some("nistp256"),
            NistP384 => Some("nistp384"),
            NistP521 => Some("nistp521"),
            BrainpoolP256 => Some("brainpoolP256r1"),
            BrainpoolP384 => Some("brainpoolP384r1"),
            BrainpoolP512 => Some("brainpoolP512r1"),
            Ed25519 => Some("ed25519"),
            Cv25519 => Some("cv25519"),
            Secp256k1 => Some("secp256k1"),
            Unknown(_) => None,
        }
    }

    /// Returns the length of public keys over this curve in bits.
    ///
    /// Returns `None` for unknown curves.
    pub fn bits(&self) -> Option<usize> {
        use self::Curve::*;
        match self {
            NistP256 => Some(256),
            NistP384 => Some(384),
            NistP521 => Some(521),
            BrainpoolP256 => Some(256),
            BrainpoolP384 => Some(384),
            BrainpoolP512 => Some(512),
            Ed25519 => Some(256),
            Cv25519 => Some(256),
            Secp256k1 => Some(256),
            Unknown(_) => None,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.name(), self.bits()) {
            (Some(name), Some(bits)) =>
                write!(f, "{} ({}bits key size)", name, bits),
            _ => f.write_str("Unknown"),
        }
    }
}
