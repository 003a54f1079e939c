//! Block payload decompression.

pub mod decode;
pub mod types;

pub use decode::decompress_block;
pub use types::{CompressionError, Decompressed};
