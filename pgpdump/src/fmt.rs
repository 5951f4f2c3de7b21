//! Utilities for formatting and parsing.

/// Conversions for hexadecimal numbers.
pub mod hex {
    use std::fmt::Write;

    use crate::{Error, Result};

    /// Encodes the given buffer as lowercase hexadecimal number.
    pub fn encode<B: AsRef<[u8]>>(buffer: B) -> String {
        let buffer = buffer.as_ref();
        let mut s = String::with_capacity(buffer.len() * 2);
        for b in buffer {
            // Writing to a String never fails.
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }

    /// Encodes the given buffer as a hex dump.
    ///
    /// Every octet is rendered as two lowercase hexadecimal digits,
    /// octets are separated by a single space, e.g. `"01 02 03"`.
    pub fn dump<B: AsRef<[u8]>>(buffer: B) -> String {
        let buffer = buffer.as_ref();
        let mut s = String::with_capacity(buffer.len() * 3);
        for (i, b) in buffer.iter().enumerate() {
            if i > 0 {
                s.push(' ');
            }
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }

    /// Decodes the given hexadecimal number, ignoring whitespace.
    pub fn decode_pretty<H: AsRef<str>>(hex: H) -> Result<Vec<u8>> {
        let nibbles = hex.as_ref().chars()
            .filter(|c| ! c.is_whitespace())
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or_else(|| {
                Error::InvalidArgument(
                    format!("Invalid hex character: {:?}", c)).into()
            }))
            .collect::<Result<Vec<u8>>>()?;

        if nibbles.len() % 2 != 0 {
            return Err(Error::InvalidArgument(
                "Odd number of nibbles".into()).into());
        }

        Ok(nibbles.chunks(2).map(|n| n[0] << 4 | n[1]).collect())
    }

    #[cfg(test)]
    mod test {
        use super::*;

        #[test]
        fn dump_format() {
            assert_eq!(dump(&[]), "");
            assert_eq!(dump(&[0x01]), "01");
            assert_eq!(dump(&[0x01, 0x02, 0xab]), "01 02 ab");
            assert_eq!(encode(&[0xde, 0xad, 0xBE, 0xef]), "deadbeef");
        }

        #[test]
        fn decode() {
            assert_eq!(decode_pretty("01 02 ab").unwrap(), vec![1, 2, 0xab]);
            assert_eq!(decode_pretty("DEAD\nbeef").unwrap(),
                       vec![0xde, 0xad, 0xbe, 0xef]);
            assert!(decode_pretty("abc").is_err());
            assert!(decode_pretty("zz").is_err());
        }
    }
}
