//! String-to-Key (S2K) specifiers.
//!
//! String-to-key (S2K) specifiers are used to convert password
//! strings into symmetric-key encryption/decryption keys.  See
//! [Section 3.7 of RFC 4880].
//!
//!   [Section 3.7 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-3.7

use std::io::SeekFrom;

use crate::{Item, Reader, Result};
use crate::fmt::hex;
use crate::parse::Context;
use crate::types::{CodedEnum, HashAlgorithm, S2KType};

/// Identifier of the private S2K type GnuPG uses for its extensions.
const GNU_S2K: u8 = 101;

/// Decodes an S2K specifier and appends it to `parent`.
///
/// Returns whether the S2K produces a symmetric key, i.e. whether an
/// IV follows.  Only GnuPG's extensions (stub keys and keys on a
/// smartcard) don't.
///
/// If decoding fails half-way, whatever was decoded is still appended
/// to `parent` and the error is returned.
///
/// # Examples
///
/// ```
/// # fn main() -> sequoia_pgpdump::Result<()> {
/// use sequoia_pgpdump::{Item, Options, Reader};
/// use sequoia_pgpdump::parse::Context;
///
/// let cx = Context::new(Options::default());
/// let mut parent = Item::new("parent");
/// let mut r = Reader::new(&[0x00, 0x08]);
/// let has_iv = sequoia_pgpdump::s2k::decode(&mut r, &cx, &mut parent)?;
/// assert!(has_iv);
///
/// let s2k = &parent.children()[0];
/// assert_eq!(s2k.get_value(), Some("Simple S2K (s2k 0)"));
/// assert_eq!(s2k.children()[0].get_value(), Some("SHA256 (hash 8)"));
/// # Ok(()) }
/// ```
pub fn decode(r: &mut Reader, cx: &Context, parent: &mut Item) -> Result<bool> {
    let debug = cx.options().get_debug();
    let typ = S2KType::from(r.read_byte()?);
    let item = typ.to_item("String-to-Key (S2K) Algorithm", debug);

    parent.push_with(item, |item| {
        match typ {
            S2KType::Simple => {
                hash(r, debug, item)?;
            },
            S2KType::Salted => {
                hash(r, debug, item)?;
                salt(r, item)?;
            },
            S2KType::Reserved => (),
            S2KType::Iterated => {
                hash(r, debug, item)?;
                salt(r, item)?;
                let c = r.read_byte()?;
                item.push(Item::new("Count")
                          .value(decode_count(c).to_string())
                          .note(format!("coded: 0x{:02x}", c)));
            },
            S2KType::Private(GNU_S2K) => return gnu_extension(r, debug, item),
            S2KType::Private(_) | S2KType::Unknown(_) => (),
        }
        Ok(true)
    })
}

/// Decodes the iteration count of an Iterated and Salted S2K.
pub fn decode_count(coded: u8) -> u32 {
    (16 + (coded as u32 & 15)) << ((coded as u32 >> 4) + 6)
}

fn hash(r: &mut Reader, debug: bool, item: &mut Item) -> Result<()> {
    let hash = HashAlgorithm::from(r.read_byte()?);
    item.push(hash.to_item("Hash Algorithm", debug));
    Ok(())
}

fn salt(r: &mut Reader, item: &mut Item) -> Result<()> {
    let salt = r.read(8)?;
    item.push(Item::new("Salt").dump(hex::dump(salt)));
    Ok(())
}

/// GnuPG's extension: a hash octet, the magic "GNU", and the
/// extension number minus 1000.
fn gnu_extension(r: &mut Reader, debug: bool, item: &mut Item)
                 -> Result<bool> {
    hash(r, debug, item)?;

    match r.read(3) {
        Ok(b"GNU") => (),
        Ok(_) => {
            r.seek(SeekFrom::Current(-3))?;
            return Ok(true);
        },
        Err(_) => return Ok(true),
    }

    let ext = r.read_byte()?;
    let name = match ext {
        1 => "gnu-dummy",
        2 => "gnu-divert-to-card",
        _ => "Unknown",
    };
    log::trace!("GnuPG S2K extension {}", 1000 + ext as u32);
    item.push_with(
        Item::new("GNU S2K extension")
            .value(format!("{} (s2k {})", name, 1000 + ext as u32)),
        |ext_item| {
            if ext == 2 {
                let len = r.read_byte()? as usize;
                let serial = r.read(len)?;
                ext_item.push(Item::new("Serial Number")
                              .note(format!("{} bytes", len))
                              .dump(hex::dump(serial)));
            }
            Ok(())
        })?;

    Ok(false)
}
