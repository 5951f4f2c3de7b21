use std::cmp;
use std::fmt;
use std::io::SeekFrom;

use crate::{Error, Result};
use crate::fmt::hex;

/// A bounds-checked cursor over a memory buffer.
///
/// All decoders read through a `Reader`.  Reads either return exactly
/// the requested amount of data and advance the cursor, or fail and
/// leave the cursor where it was.
///
/// A read fails with [`Error::NoData`] if the buffer has been
/// consumed completely, and with [`Error::UnexpectedEof`] if some, but
/// not enough data is left.
///
///   [`Error::NoData`]: enum.Error.html#variant.NoData
///   [`Error::UnexpectedEof`]: enum.Error.html#variant.UnexpectedEof
#[derive(Clone)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    // The next byte to read in the buffer.
    cursor: usize,
}

impl<'a> fmt::Display for Reader<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Reader ({} of {} bytes read)",
               self.cursor, self.buffer.len())
    }
}

impl<'a> fmt::Debug for Reader<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Reader")
            .field("buffer (bytes)", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<'a> Reader<'a> {
    /// Instantiates a new `Reader`.
    ///
    /// `buffer` contains the `Reader`'s contents.
    pub fn new(buffer: &'a [u8]) -> Self {
        Reader {
            buffer,
            cursor: 0,
        }
    }

    /// Returns the current offset.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Returns the number of bytes that have not been consumed yet.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Returns whether all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads and consumes `amount` bytes.
    pub fn read(&mut self, amount: usize) -> Result<&'a [u8]> {
        if amount == 0 {
            return Ok(&self.buffer[self.cursor..self.cursor]);
        }
        if self.remaining() == 0 {
            return Err(Error::NoData.into());
        }
        if self.remaining() < amount {
            return Err(Error::UnexpectedEof.into());
        }

        let start = self.cursor;
        self.cursor += amount;
        assert!(self.cursor <= self.buffer.len());
        Ok(&self.buffer[start..self.cursor])
    }

    /// Reads and consumes a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    /// Reads a 16-bit unsigned integer in big endian format.
    pub fn read_be_u16(&mut self) -> Result<u16> {
        let input = self.read(2)?;
        Ok(((input[0] as u16) << 8) + (input[1] as u16))
    }

    /// Reads a 32-bit unsigned integer in big endian format.
    pub fn read_be_u32(&mut self) -> Result<u32> {
        let input = self.read(4)?;
        Ok(((input[0] as u32) << 24) + ((input[1] as u32) << 16)
           + ((input[2] as u32) << 8) + (input[3] as u32))
    }

    /// Reads everything that is left.
    ///
    /// This never fails: if all data has been consumed, the returned
    /// slice is empty.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let start = self.cursor;
        self.cursor = self.buffer.len();
        &self.buffer[start..]
    }

    /// Consumes the next `amount` bytes and returns a reader limited
    /// to them.
    pub fn sub_reader(&mut self, amount: usize) -> Result<Reader<'a>> {
        Ok(Reader::new(self.read(amount)?))
    }

    /// Moves the cursor.
    ///
    /// Returns the new offset.  Seeking before the start or past the
    /// end of the buffer is an error and leaves the cursor unchanged.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<usize> {
        let len = self.buffer.len() as i128;
        let target = match pos {
            SeekFrom::Start(o) => o as i128,
            SeekFrom::Current(o) => self.cursor as i128 + o as i128,
            SeekFrom::End(o) => len + o as i128,
        };

        if target < 0 || target > len {
            return Err(Error::InvalidArgument(
                format!("Seek to {} is outside of the buffer (0..={})",
                        target, len)).into());
        }

        self.cursor = target as usize;
        Ok(self.cursor)
    }

    /// Returns a hex dump of the data starting at `from`.
    ///
    /// This does not move the cursor.  Offsets past the end of the
    /// buffer yield an empty dump.
    pub fn peek_hex_dump(&self, from: usize) -> String {
        hex::dump(&self.buffer[cmp::min(from, self.buffer.len())..])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn err(r: Result<impl std::fmt::Debug>) -> Error {
        r.unwrap_err().downcast::<Error>().unwrap()
    }

    #[test]
    fn read() {
        let data = [1, 2, 3, 4, 5, 6, 7];
        let mut r = Reader::new(&data[..]);
        assert_eq!(r.remaining(), 7);
        assert_eq!(r.read_byte().unwrap(), 1);
        assert_eq!(r.read_be_u16().unwrap(), 0x0203);
        assert_eq!(r.read_byte().unwrap(), 4);
        assert_eq!(r.offset(), 4);
        assert_eq!(r.remaining(), 3);
        assert_eq!(err(r.read_be_u32()), Error::UnexpectedEof);
        // A failed read does not consume anything.
        assert_eq!(r.offset(), 4);
        assert_eq!(err(r.read(4)), Error::UnexpectedEof);
        assert_eq!(r.offset(), 4);
        assert_eq!(r.read(0).unwrap(), &[0u8; 0][..]);
        assert_eq!(r.read_to_end(), &[5, 6, 7][..]);
        assert!(r.is_empty());
        assert_eq!(err(r.read_byte()), Error::NoData);
        assert_eq!(r.read_to_end(), &[0u8; 0][..]);
    }

    #[test]
    fn seek() {
        let data = b"GNU\x01";
        let mut r = Reader::new(&data[..]);
        assert_eq!(r.read(3).unwrap(), b"GNU");
        assert_eq!(r.seek(SeekFrom::Current(-3)).unwrap(), 0);
        assert_eq!(r.seek(SeekFrom::End(-1)).unwrap(), 3);
        assert_eq!(r.read_byte().unwrap(), 1);
        assert!(r.seek(SeekFrom::Current(1)).is_err());
        assert!(r.seek(SeekFrom::End(-5)).is_err());
        assert_eq!(r.offset(), 4);
        assert_eq!(r.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert!(r.seek(SeekFrom::Start(5)).is_err());
    }

    #[test]
    fn sub_reader_and_dump() {
        let data = [0xca, 0xfe, 0xba, 0xbe];
        let mut r = Reader::new(&data[..]);
        let mut s = r.sub_reader(2).unwrap();
        assert_eq!(r.offset(), 2);
        assert_eq!(s.read_be_u16().unwrap(), 0xcafe);
        assert!(s.is_empty());
        assert_eq!(r.peek_hex_dump(1), "fe ba be");
        assert_eq!(r.peek_hex_dump(17), "");
        assert_eq!(r.offset(), 2);
    }
}
