//! Multiprecision Integers.
//!
//! Cryptographic objects like keys, signatures, and encrypted session
//! keys are stored as sequences of multiprecision integers (MPIs), see
//! [Section 3.2 of RFC 4880].  Elliptic curve algorithms additionally
//! prepend the curve's OID and, for ECDH, append parameters for the
//! key derivation function, see [RFC 6637].
//!
//! The layout depends on the public key algorithm and on where the
//! material is stored.  This module knows all layouts and decodes
//! them into items.
//!
//!   [Section 3.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-3.2
//!   [RFC 6637]: https://tools.ietf.org/html/rfc6637

use crate::{Item, Reader, Result};
use crate::fmt::hex;
use crate::parse::Context;
use crate::types::{
    CodedEnum,
    Curve,
    HashAlgorithm,
    PublicKeyAlgorithm,
    SymmetricAlgorithm,
};

/// A field of some cryptographic material.
#[derive(Clone, Copy, Debug)]
enum Field {
    /// An MPI with the given name.
    Mpi(&'static str),
    /// The length-prefixed OID of an elliptic curve.
    Oid,
    /// The length-prefixed KDF parameters of an ECDH key.
    KdfParameters,
    /// The length-prefixed, wrapped session key of ECDH.
    EncodedKey,
}

use self::Field::*;

/// Where the material is stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Usage {
    PublicKey,
    Signature,
    SessionKey,
    SecretKey,
    EncryptedSecretKey,
}

fn layout(usage: Usage, algo: PublicKeyAlgorithm)
          -> Option<&'static [Field]> {
    use crate::types::PublicKeyAlgorithm::*;

    let fields: &'static [Field] = match (usage, algo) {
        (Usage::PublicKey, RSAEncryptSign)
            | (Usage::PublicKey, RSAEncrypt)
            | (Usage::PublicKey, RSASign) =>
            &[Mpi("RSA public modulus n"),
              Mpi("RSA public encryption exponent e")],
        (Usage::PublicKey, DSA) =>
            &[Mpi("DSA p"), Mpi("DSA q"), Mpi("DSA g"), Mpi("DSA y")],
        (Usage::PublicKey, ElGamalEncrypt)
            | (Usage::PublicKey, ElGamalEncryptSign) =>
            &[Mpi("Elgamal p"), Mpi("Elgamal g"), Mpi("Elgamal y")],
        (Usage::PublicKey, ECDH) =>
            &[Oid, Mpi("ECDH EC point"), KdfParameters],
        (Usage::PublicKey, ECDSA) => &[Oid, Mpi("ECDSA EC point")],
        (Usage::PublicKey, EdDSA) => &[Oid, Mpi("EdDSA EC point")],

        (Usage::Signature, RSAEncryptSign)
            | (Usage::Signature, RSASign) =>
            &[Mpi("RSA signature value m^d mod n")],
        (Usage::Signature, DSA) =>
            &[Mpi("DSA value r"), Mpi("DSA value s")],
        (Usage::Signature, ElGamalEncryptSign) =>
            &[Mpi("Elgamal a"), Mpi("Elgamal b")],
        (Usage::Signature, ECDSA) =>
            &[Mpi("ECDSA value r"), Mpi("ECDSA value s")],
        (Usage::Signature, EdDSA) =>
            &[Mpi("EdDSA compressed value r"), Mpi("EdDSA compressed value s")],

        (Usage::SessionKey, RSAEncryptSign)
            | (Usage::SessionKey, RSAEncrypt) =>
            &[Mpi("RSA m^e mod n")],
        (Usage::SessionKey, ElGamalEncrypt)
            | (Usage::SessionKey, ElGamalEncryptSign) =>
            &[Mpi("Elgamal g^k mod p"), Mpi("Elgamal m * y^k mod p")],
        (Usage::SessionKey, ECDH) =>
            &[Mpi("ECDH EC point"), EncodedKey],

        (Usage::SecretKey, RSAEncryptSign)
            | (Usage::SecretKey, RSAEncrypt)
            | (Usage::SecretKey, RSASign)
            | (Usage::EncryptedSecretKey, RSAEncryptSign)
            | (Usage::EncryptedSecretKey, RSAEncrypt)
            | (Usage::EncryptedSecretKey, RSASign) =>
            &[Mpi("RSA secret exponent d"),
              Mpi("RSA secret prime value p"),
              Mpi("RSA secret prime value q (p < q)"),
              Mpi("RSA u, the multiplicative inverse of p, mod q")],
        (Usage::SecretKey, DSA) | (Usage::EncryptedSecretKey, DSA) =>
            &[Mpi("DSA secret exponent x")],
        (Usage::SecretKey, ElGamalEncrypt)
            | (Usage::SecretKey, ElGamalEncryptSign)
            | (Usage::EncryptedSecretKey, ElGamalEncrypt)
            | (Usage::EncryptedSecretKey, ElGamalEncryptSign) =>
            &[Mpi("Elgamal secret exponent x")],
        (Usage::SecretKey, ECDH) | (Usage::EncryptedSecretKey, ECDH) =>
            &[Mpi("ECDH secret key")],
        (Usage::SecretKey, ECDSA) | (Usage::EncryptedSecretKey, ECDSA) =>
            &[Mpi("ECDSA secret key")],
        (Usage::SecretKey, EdDSA) | (Usage::EncryptedSecretKey, EdDSA) =>
            &[Mpi("EdDSA secret key")],

        _ => return None,
    };
    Some(fields)
}

/// Decodes the public key material of a key packet.
pub fn public_key(algo: PublicKeyAlgorithm, r: &mut Reader, cx: &Context,
                  parent: &mut Item) -> Result<()> {
    decode(Usage::PublicKey, algo, r, cx, parent)
}

/// Decodes the MPIs of a signature packet.
pub fn signature(algo: PublicKeyAlgorithm, r: &mut Reader, cx: &Context,
                 parent: &mut Item) -> Result<()> {
    decode(Usage::Signature, algo, r, cx, parent)
}

/// Decodes the encrypted session key of a public-key encrypted
/// session key packet.
pub fn session_key(algo: PublicKeyAlgorithm, r: &mut Reader, cx: &Context,
                   parent: &mut Item) -> Result<()> {
    decode(Usage::SessionKey, algo, r, cx, parent)
}

/// Decodes the unencrypted secret key material of a secret key
/// packet.
pub fn secret_key(algo: PublicKeyAlgorithm, r: &mut Reader, cx: &Context,
                  parent: &mut Item) -> Result<()> {
    decode(Usage::SecretKey, algo, r, cx, parent)
}

/// Decodes the encrypted secret key material of a version 3 secret
/// key packet.
///
/// Version 3 keys only encrypt the value of the MPIs, their lengths
/// are stored in the clear.
pub fn encrypted_secret_key(algo: PublicKeyAlgorithm, r: &mut Reader,
                            cx: &Context, parent: &mut Item) -> Result<()> {
    decode(Usage::EncryptedSecretKey, algo, r, cx, parent)
}

fn decode(usage: Usage, algo: PublicKeyAlgorithm, r: &mut Reader,
          cx: &Context, parent: &mut Item) -> Result<()> {
    let fields = match layout(usage, algo) {
        Some(fields) => fields,
        None => {
            log::debug!("No {:?} layout for {}", usage, algo);
            let rest = r.read_to_end();
            parent.push(
                Item::new(format!("Multi-precision integers of {}",
                                  algo.label()))
                    .note(format!("{} bytes", rest.len()))
                    .dump_if(cx.options().get_debug(), hex::dump(rest)));
            return Ok(());
        },
    };

    for field in fields {
        let item = match field {
            Mpi(name) if usage == Usage::EncryptedSecretKey =>
                mpi(r, cx, &format!("Encrypted {}", name))?,
            Mpi(name) => mpi(r, cx, name)?,
            Oid => oid(r, cx)?,
            KdfParameters => kdf_parameters(r, cx)?,
            EncodedKey => {
                let len = r.read_byte()? as usize;
                let key = r.read(len)?;
                Item::new("symmetric key (encoded)")
                    .note(format!("{} bytes", len))
                    .dump(hex::dump(key))
            },
        };
        parent.push(item);
    }

    Ok(())
}

/// Decodes an MPI.
///
/// The note gives the length in bits.  The value is only dumped if
/// the `integer` option is set, otherwise the dump is masked as
/// `"..."`.
pub fn mpi(r: &mut Reader, cx: &Context, name: &str) -> Result<Item> {
    let bits = r.read_be_u16()? as usize;
    let bytes = r.read(byte_length(bits))?;
    Ok(Item::new(name)
       .note(format!("{} bits", bits))
       .dump(if cx.options().get_integer() {
           hex::dump(bytes)
       } else {
           "...".into()
       }))
}

/// Returns the number of octets needed to store `bits` bits.
pub fn byte_length(bits: usize) -> usize {
    (bits + 7) / 8
}

/// Decodes the length-prefixed OID of an elliptic curve.
pub fn oid(r: &mut Reader, cx: &Context) -> Result<Item> {
    let len = r.read_byte()? as usize;
    let oid = r.read(len)?;
    Ok(Item::new("ECC Curve OID")
       .value(Curve::from_oid(oid).to_string())
       .dump_if(cx.options().get_debug(), hex::dump(oid)))
}

/// Decodes the length-prefixed KDF parameters of an ECDH key.
pub fn kdf_parameters(r: &mut Reader, cx: &Context) -> Result<Item> {
    let debug = cx.options().get_debug();
    let len = r.read_byte()? as usize;
    let mut params = r.sub_reader(len)?;
    let mut item = Item::new("KDF parameters")
        .note(format!("{} bytes", len))
        .dump_if(debug, params.peek_hex_dump(0));

    // A reserved octet that must be 1, the hash for the KDF, and the
    // symmetric algorithm to wrap the session key.
    if len == 3 && params.read_byte()? == 1 {
        item.push(HashAlgorithm::from(params.read_byte()?)
                  .to_item("Hash Algorithm", debug));
        item.push(SymmetricAlgorithm::from(params.read_byte()?)
                  .to_item("Symmetric Algorithm", debug));
    }
    Ok(item)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Options;

    fn cx() -> Context {
        Context::new(Options::default())
    }

    quickcheck::quickcheck! {
        fn mpi_lengths(bits: u16) -> bool {
            let bits = bits as usize;
            let len = byte_length(bits);
            let mut data = vec![(bits >> 8) as u8, bits as u8];
            data.resize(2 + len, 0xaa);

            let short = &data[..data.len() - 1];
            let fails = mpi(&mut Reader::new(short), &cx(), "x").is_err();

            let mut r = Reader::new(&data);
            let ok = match mpi(&mut r, &cx(), "x") {
                Ok(item) => item.get_note() == Some(&format!("{} bits", bits)[..]),
                Err(_) => false,
            };
            len == (bits + 7) / 8 && fails && ok && r.is_empty()
        }
    }

    #[test]
    fn mpi_dump() {
        let data = [0x00, 0x09, 0x01, 0xff];
        let item = mpi(&mut Reader::new(&data), &cx(), "RSA m^e mod n").unwrap();
        assert_eq!(item.get_note(), Some("9 bits"));
        assert_eq!(item.get_dump(), Some("..."));

        let cx = Context::new(Options::default().integer(true));
        let item = mpi(&mut Reader::new(&data), &cx, "RSA m^e mod n").unwrap();
        assert_eq!(item.get_dump(), Some("01 ff"));
    }

    #[test]
    fn ecdh_public_key() {
        let mut data = vec![0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
        data.extend_from_slice(&[0x00, 0x03, 0x04]);
        data.extend_from_slice(&[0x03, 0x01, 0x08, 0x07]);
        let mut r = Reader::new(&data);
        let mut parent = Item::new("Public-Key Packet (tag 6)");
        public_key(PublicKeyAlgorithm::ECDH, &mut r, &cx(), &mut parent)
            .unwrap();
        assert!(r.is_empty());

        let c = parent.children();
        assert_eq!(c.len(), 3);
        assert_eq!(c[0].get_value(), Some("nistp256 (256bits key size)"));
        assert_eq!(c[1].name(), "ECDH EC point");
        assert_eq!(c[2].name(), "KDF parameters");
        assert_eq!(c[2].children()[0].get_value(), Some("SHA256 (hash 8)"));
        assert_eq!(c[2].children()[1].get_value(),
                   Some("AES with 128-bit key (sym 7)"));
    }

    #[test]
    fn unknown_algorithm() {
        let data = [1, 2, 3, 4, 5];
        let mut r = Reader::new(&data);
        let mut parent = Item::new("parent");
        signature(PublicKeyAlgorithm::from(99), &mut r, &cx(), &mut parent)
            .unwrap();
        assert!(r.is_empty());
        assert_eq!(parent.children()[0].name(),
                   "Multi-precision integers of Unknown (pub 99)");
        assert_eq!(parent.children()[0].get_note(), Some("5 bytes"));

        // Encryption-only algorithms have no signature layout.
        let mut r = Reader::new(&data);
        let mut parent = Item::new("parent");
        signature(PublicKeyAlgorithm::RSAEncrypt, &mut r, &cx(), &mut parent)
            .unwrap();
        assert_eq!(parent.children()[0].name(),
                   "Multi-precision integers of RSA Encrypt-Only (pub 2)");
    }

    #[test]
    fn truncated() {
        let data = [0x00, 0x08, 0x01, 0x00, 0x10, 0x01];
        let mut r = Reader::new(&data);
        let mut parent = Item::new("parent");
        assert!(signature(PublicKeyAlgorithm::DSA, &mut r, &cx(), &mut parent)
                .is_err());
        assert_eq!(parent.children().len(), 1);
    }
}
