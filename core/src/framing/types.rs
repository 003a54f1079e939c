use std::fmt;

use bitflags::bitflags;

use crate::constants::{BLOCK_HEADER_LEN, TAG_LEN};

bitflags! {
    /// Block feature bits. Only `COMPRESSED` is assigned today (and the
    /// device always sets it); the rest of the byte is reserved for future
    /// negotiation.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BlockFlags: u8 {
        const COMPRESSED = 0b0000_0001;
    }
}

/// Parsed 12-byte block header.
///
/// Wire layout, all multi-byte fields little-endian:
/// `u32 raw_size | u32 compressed_size | u8 flags | u8 nonce_size | u16 block_id`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Uncompressed payload size declared by the device.
    pub raw_size: u32,
    /// Ciphertext size (equals the compressed plaintext size).
    pub compressed_size: u32,
    pub flags: BlockFlags,
    pub nonce_size: u8,
    pub block_id: u16,
}

impl BlockHeader {
    pub const LEN: usize = BLOCK_HEADER_LEN;

    /// Declared payload length: nonce, ciphertext, and the fixed AEAD tag.
    pub fn payload_len(&self) -> usize {
        self.compressed_size as usize + self.nonce_size as usize + TAG_LEN
    }
}

/// One framed block. The payload borrows from the input buffer; descriptors
/// are consumed within a single orchestrator iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Zero-based position in file order.
    pub index: usize,
    /// Byte offset of the header within the input buffer.
    pub offset: usize,
    pub header: BlockHeader,
    /// Payload bytes actually available. May be shorter than declared when
    /// a lenient scan truncated an overrunning block.
    pub payload: &'a [u8],
}

impl RawBlock<'_> {
    /// Whether the available payload is shorter than the header declares.
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < self.header.payload_len()
    }
}

/// Result of a framing scan: blocks in file order plus scan-level warnings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutcome<'a> {
    pub blocks: Vec<RawBlock<'a>>,
    pub warnings: Vec<FramingWarning>,
}

/// Framing failures. Under the lenient policy most of these degrade to
/// [`FramingWarning`]s instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// Fewer than 12 bytes handed to the header parser.
    ShortHeader { have: usize },

    /// Bytes after the last block are too short to hold a header.
    TrailingBytes { offset: usize, len: usize },

    /// Declared payload extends past the end of the buffer.
    PayloadOverrun {
        index: usize,
        offset: usize,
        declared: usize,
        available: usize,
    },
}

impl FramingError {
    /// Index of the block the error is scoped to, when it maps to one.
    /// Short-header and trailing-fragment errors precede a parsed block.
    pub fn block_index(&self) -> Option<usize> {
        match self {
            FramingError::PayloadOverrun { index, .. } => Some(*index),
            FramingError::ShortHeader { .. } | FramingError::TrailingBytes { .. } => None,
        }
    }
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingError::ShortHeader { have } => {
                write!(f, "block header truncated: {} of {} bytes", have, BlockHeader::LEN)
            }
            FramingError::TrailingBytes { offset, len } => {
                write!(f, "{} trailing bytes at offset {} are shorter than a block header", len, offset)
            }
            FramingError::PayloadOverrun { index, offset, declared, available } => {
                write!(
                    f,
                    "block {} at offset {} declares a {}-byte payload but only {} bytes remain",
                    index, offset, declared, available
                )
            }
        }
    }
}

impl std::error::Error for FramingError {}

/// Non-fatal scan diagnostics emitted under the lenient policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingWarning {
    /// Trailing fragment shorter than a header, discarded.
    TrailingBytes { offset: usize, len: usize },

    /// Overrunning payload truncated to the available bytes; the block is
    /// still handed to the pipeline.
    TruncatedPayload {
        index: usize,
        declared: usize,
        available: usize,
    },
}

impl fmt::Display for FramingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramingWarning::TrailingBytes { offset, len } => {
                write!(f, "discarded {} trailing bytes at offset {} (shorter than a block header)", len, offset)
            }
            FramingWarning::TruncatedPayload { index, declared, available } => {
                write!(
                    f,
                    "block {} payload truncated: declared {} bytes, {} available",
                    index, declared, available
                )
            }
        }
    }
}
