//! Packet framing.
//!
//! Every packet starts with a Cipher Type Byte (CTB) that holds the
//! tag, followed by the length of the body.  OpenPGP defines two
//! packet formats, the old and the new format, which differ in how
//! the length is encoded.  See [Section 4.2 of RFC 4880].
//!
//!   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2

use crate::{Error, Reader, Result};
use crate::types::Tag;

/// The PacketLengthType is used as part of the old CTB, and is
/// partially used to determine the packet's size.
///
/// See [Section 4.2.1 of RFC 4880] for more details.
///
///   [Section 4.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketLengthType {
    /// A one-octet Body Length header encodes a length of 0 to 191 octets.
    OneOctet,
    /// A two-octet Body Length header encodes a length of 192 to 8383 octets.
    TwoOctets,
    /// A four-octet Body Length header encodes a length of up to 4GB.
    FourOctets,
    /// The packet is of indeterminate length.
    Indeterminate,
}

impl From<u8> for PacketLengthType {
    fn from(u: u8) -> Self {
        match u & 0b11 {
            0 => PacketLengthType::OneOctet,
            1 => PacketLengthType::TwoOctets,
            2 => PacketLengthType::FourOctets,
            _ => PacketLengthType::Indeterminate,
        }
    }
}

/// A sum type for the different CTB variants.
///
/// Note: CTB stands for Cipher Type Byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CTB {
    /// The new CTB format.
    New(Tag),
    /// The old CTB format.
    Old(Tag, PacketLengthType),
}

impl CTB {
    /// Decodes a CTB.
    ///
    /// Bit 7 must be set, otherwise the data is not OpenPGP.
    pub fn from_ptag(ptag: u8) -> Result<CTB> {
        if ptag & 0b1000_0000 == 0 {
            return Err(Error::MalformedPacket(
                format!("Malformed CTB: MSB of ptag (0x{:02x}) not set", ptag))
                       .into());
        }

        if ptag & 0b0100_0000 != 0 {
            Ok(CTB::New(Tag::from(ptag & 0b0011_1111)))
        } else {
            Ok(CTB::Old(Tag::from((ptag & 0b0011_1100) >> 2),
                        PacketLengthType::from(ptag)))
        }
    }

    /// Returns the tag.
    pub fn tag(&self) -> Tag {
        match self {
            CTB::New(tag) | CTB::Old(tag, _) => *tag,
        }
    }
}

/// The size of a packet.
///
/// See [Section 4.2 of RFC 4880] for more details.
///
///   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLength {
    /// Packet size is fully known.
    Full(u32),
    /// The parameter is the number of bytes in the current chunk.
    /// This type is only used with new format packets.
    Partial(u32),
    /// The packet extends until an EOF is encountered.  This type is
    /// only used with old format packets.
    Indeterminate,
}

impl BodyLength {
    /// Decodes a new format body length as described in [Section
    /// 4.2.2 of RFC 4880].
    ///
    ///   [Section 4.2.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.2
    pub fn parse_new_format(r: &mut Reader) -> Result<BodyLength> {
        let octet1 = r.read_byte()?;
        match octet1 {
            0..=191 => // One octet.
                Ok(BodyLength::Full(octet1 as u32)),
            192..=223 => { // Two octets length.
                let octet2 = r.read_byte()?;
                Ok(BodyLength::Full(((octet1 as u32 - 192) << 8)
                                    + octet2 as u32 + 192))
            },
            224..=254 => // Partial body length.
                Ok(BodyLength::Partial(1 << (octet1 & 0x1F))),
            255 => // Five octets.
                Ok(BodyLength::Full(r.read_be_u32()?)),
        }
    }

    /// Decodes an old format body length as described in [Section
    /// 4.2.1 of RFC 4880].
    ///
    ///   [Section 4.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.1
    pub fn parse_old_format(r: &mut Reader, length_type: PacketLengthType)
                            -> Result<BodyLength> {
        match length_type {
            PacketLengthType::OneOctet =>
                Ok(BodyLength::Full(r.read_byte()? as u32)),
            PacketLengthType::TwoOctets =>
                Ok(BodyLength::Full(r.read_be_u16()? as u32)),
            PacketLengthType::FourOctets =>
                Ok(BodyLength::Full(r.read_be_u32()?)),
            PacketLengthType::Indeterminate =>
                Ok(BodyLength::Indeterminate),
        }
    }
}

/// A framed packet: its tag and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaquePacket {
    ctb: CTB,
    body: Vec<u8>,
}

impl OpaquePacket {
    /// Creates a packet from its parts.
    pub fn new(ctb: CTB, body: Vec<u8>) -> Self {
        OpaquePacket { ctb, body }
    }

    /// Returns the CTB.
    pub fn ctb(&self) -> CTB {
        self.ctb
    }

    /// Returns the tag.
    pub fn tag(&self) -> Tag {
        self.ctb.tag()
    }

    /// Returns the body.
    ///
    /// Partial body chunks have been concatenated.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Reads the next packet.
    pub fn parse(r: &mut Reader) -> Result<OpaquePacket> {
        let ctb = CTB::from_ptag(r.read_byte()?)?;
        let length = match ctb {
            CTB::New(_) => BodyLength::parse_new_format(r)?,
            CTB::Old(_, length_type) =>
                BodyLength::parse_old_format(r, length_type)?,
        };
        log::trace!("{:?}: {:?} at offset {}", ctb, length, r.offset());

        let body = match length {
            BodyLength::Full(len) => r.read(len as usize)?.to_vec(),
            BodyLength::Indeterminate => r.read_to_end().to_vec(),
            BodyLength::Partial(len) => {
                let mut body = r.read(len as usize)?.to_vec();
                loop {
                    match BodyLength::parse_new_format(r)? {
                        BodyLength::Partial(len) =>
                            body.extend_from_slice(r.read(len as usize)?),
                        BodyLength::Full(len) => {
                            body.extend_from_slice(r.read(len as usize)?);
                            break;
                        },
                        BodyLength::Indeterminate =>
                            return Err(Error::MalformedPacket(
                                "Indeterminate length in partial body"
                                    .into()).into()),
                    }
                }
                body
            },
        };

        Ok(OpaquePacket { ctb, body })
    }
}

/// Splits a byte stream into packets.
///
/// The iterator ends after the first framing error.
#[derive(Debug)]
pub struct PacketSplitter<'a> {
    reader: Reader<'a>,
    failed: bool,
}

impl<'a> PacketSplitter<'a> {
    /// Creates a splitter for `data`.
    pub fn new(data: &'a [u8]) -> Self {
        PacketSplitter {
            reader: Reader::new(data),
            failed: false,
        }
    }
}

impl<'a> Iterator for PacketSplitter<'a> {
    type Item = Result<OpaquePacket>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }

        let offset = self.reader.offset();
        let r = OpaquePacket::parse(&mut self.reader);
        if let Err(ref e) = r {
            log::warn!("Framing error at offset {}: {}", offset, e);
            self.failed = true;
        }
        Some(r)
    }
}
