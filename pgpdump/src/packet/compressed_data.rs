//! Compressed Data packets.
//!
//! See [Section 5.6 of RFC 4880].  If the algorithm is supported, the
//! content is inflated and the contained packets are decoded as
//! children of the packet.
//!
//!   [Section 5.6 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.6

use std::io::{self, Read};

use crate::{Item, Reader, Result};
use crate::packet::decode_stream;
use crate::parse::Context;
use crate::types::{CodedEnum, CompressionAlgorithm};

pub(crate) fn decode(r: &mut Reader, cx: &mut Context, item: &mut Item)
                     -> Result<()> {
    let algo = CompressionAlgorithm::from(r.read_byte()?);
    item.push(algo.to_item("Compression Algorithm", cx.options().get_debug()));

    let compressed = r.read_to_end();
    item.push(Item::new("Compressed data")
              .note(format!("{} bytes", compressed.len())));

    let inflated = match inflate(algo, compressed, cx.inflation_budget()) {
        Some(Ok(data)) => {
            cx.charge_inflated(data.len() as u64);
            data
        },
        Some(Err(e)) => {
            log::warn!("Failed to inflate {}: {}", algo, e);
            item.push(Item::new("Decompressed data")
                      .note(format!("failed to decompress: {}", e)));
            return Ok(());
        },
        None => {
            log::debug!("Not decompressing {}", algo);
            return Ok(());
        },
    };

    let mut content = Item::new("Decompressed data")
        .note(format!("{} bytes", inflated.len()));
    let result = cx.nested(|cx| decode_stream(&inflated, cx, &mut content));
    item.push(content);
    result
}

/// Inflates `data` to at most `limit` bytes.
///
/// Returns `None` if the algorithm is not supported.
fn inflate(algo: CompressionAlgorithm, data: &[u8], limit: u64)
           -> Option<io::Result<Vec<u8>>> {
    match algo {
        CompressionAlgorithm::Uncompressed => Some(read_limited(data, limit)),
        #[cfg(feature = "compression-deflate")]
        CompressionAlgorithm::Zip =>
            Some(read_limited(flate2::read::DeflateDecoder::new(data), limit)),
        #[cfg(feature = "compression-deflate")]
        CompressionAlgorithm::Zlib =>
            Some(read_limited(flate2::read::ZlibDecoder::new(data), limit)),
        #[cfg(feature = "compression-bzip2")]
        CompressionAlgorithm::BZip2 =>
            Some(read_limited(bzip2::read::BzDecoder::new(data), limit)),
        _ => None,
    }
}

fn read_limited<R: Read>(decoder: R, limit: u64) -> io::Result<Vec<u8>> {
    let mut inflated = Vec::new();
    decoder.take(limit.saturating_add(1)).read_to_end(&mut inflated)?;
    if inflated.len() as u64 > limit {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("more than {} bytes", limit)));
    }
    Ok(inflated)
}
