//! Content-encoding transform
//!
//! All three schemes run DEFLATE at the best compression level and differ
//! only in framing.

use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Write};

use crate::config::ContentEncoding;

/// Encode `content` with the given scheme
pub fn encode(content: &[u8], encoding: ContentEncoding) -> io::Result<Vec<u8>> {
    match encoding {
        ContentEncoding::Zlib => zlib_encode(content),
        ContentEncoding::Deflate => deflate_encode(content),
        ContentEncoding::Gzip => gzip_encode(content),
    }
}

/// DEFLATE wrapped in zlib framing
pub fn zlib_encode(content: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(content)?;
    encoder.finish()
}

/// Raw DEFLATE, no header or trailer
pub fn deflate_encode(content: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(content)?;
    encoder.finish()
}

/// DEFLATE wrapped in gzip framing
pub fn gzip_encode(content: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(content)?;
    encoder.finish()
}
