//! Block framing: scanning raw file bytes into self-described block
//! descriptors.

pub mod decode;
pub mod encode;
pub mod types;

pub use decode::{parse_block_header, scan_blocks};
pub use encode::encode_block_header;
pub use types::{
    BlockFlags, BlockHeader, FramingError, FramingWarning, RawBlock, ScanOutcome,
};
