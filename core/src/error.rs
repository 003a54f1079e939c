//! Unified error type for the decode pipeline.

use std::fmt;

use crate::compression::CompressionError;
use crate::crypto::CryptoError;
use crate::framing::FramingError;
use crate::tlv::RecordError;

/// Unified decode error covering framing, crypto, compression, and record
/// scopes.
/// - `From` impls enable `?` across pipeline internals.
/// - The orchestrator converts these into block- or record-scoped report
///   entries rather than aborting the run.
#[derive(Debug)]
pub enum DecodeError {
    /// Block boundary error (short header, payload overrun).
    Framing(FramingError),

    /// Cryptographic error (short payload, key lookup, tag mismatch).
    Crypto(CryptoError),

    /// Decompression error (corrupt or truncated stream).
    Compression(CompressionError),

    /// Record-scoped TLV error (payload shorter than its type requires).
    Record(RecordError),

    /// Configuration rejected before any input byte is touched.
    Config(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Framing(e) => write!(f, "framing error: {}", e),
            DecodeError::Crypto(e) => write!(f, "crypto error: {}", e),
            DecodeError::Compression(e) => write!(f, "compression error: {}", e),
            DecodeError::Record(e) => write!(f, "record error: {}", e),
            DecodeError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<FramingError> for DecodeError {
    fn from(e: FramingError) -> Self {
        DecodeError::Framing(e)
    }
}

impl From<CryptoError> for DecodeError {
    fn from(e: CryptoError) -> Self {
        DecodeError::Crypto(e)
    }
}

impl From<CompressionError> for DecodeError {
    fn from(e: CompressionError) -> Self {
        DecodeError::Compression(e)
    }
}

impl From<RecordError> for DecodeError {
    fn from(e: RecordError) -> Self {
        DecodeError::Record(e)
    }
}
