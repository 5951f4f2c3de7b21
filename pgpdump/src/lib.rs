//! Dumps OpenPGP packets.
//!
//! This crate decodes OpenPGP data as defined by [RFC 4880] (and the
//! parts of [RFC 4880bis] that were deployed, like AEAD encrypted
//! data and version 5 keys) into a tree of named fields.  It is a
//! forensic tool: nothing is decrypted, nothing is verified, and no
//! key material is needed.  Every field is reported the way it
//! appears on the wire, including the values that a validating
//! implementation would reject.
//!
//! The input may be binary or ASCII armored.  It is split into
//! packets, and every packet is turned into an [`Item`] tree.  The
//! trees can be rendered as JSON or as a plain text tree.
//!
//! # Examples
//!
//! ```
//! # fn main() -> sequoia_pgpdump::Result<()> {
//! use sequoia_pgpdump::{Options, parse::Parser};
//!
//! // A literal data packet containing "Hello".
//! let msg = b"\xcb\x0bb\x00\x00\x00\x00\x00Hello";
//! let dump = Parser::new(Options::default().utc(true)).parse(msg);
//! assert!(dump.is_ok());
//! assert_eq!(dump.packets()[0].name(), "Literal Data Packet (tag 11)");
//! # Ok(()) }
//! ```
//!
//! [RFC 4880]: https://tools.ietf.org/html/rfc4880
//! [RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10
//! [`Item`]: struct.Item.html

#![warn(missing_docs)]

pub mod armor;
pub mod fmt;
mod item;
pub use item::Item;
mod keyid;
pub use keyid::KeyID;
pub mod mpis;
mod options;
pub use options::Options;
pub mod packet;
pub mod parse;
mod reader;
pub use reader::Reader;
pub mod s2k;
pub mod subpacket;
pub mod types;

/// Crate result specialization.
pub type Result<T> = ::std::result::Result<T, anyhow::Error>;

/// Errors returned by this crate.
///
/// Note: This enum cannot be exhaustively matched to allow future
/// extensions.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A field needs more data than is left.
    #[error("Unexpected end of data")]
    UnexpectedEof,

    /// A field was requested, but everything has been consumed.
    #[error("No data left")]
    NoData,

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A malformed packet.
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    /// Malformed ASCII armor.
    #[error("Malformed armor: {0}")]
    MalformedArmor(String),

    /// Packets nest deeper than we are willing to follow.
    #[error("Recursion limit of {0} exceeded")]
    RecursionLimit(usize),
}
