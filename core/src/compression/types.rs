use std::fmt;

/// Output of one block decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub data: Vec<u8>,
    /// True when the configured algorithm has no real decompressor yet and
    /// the input was handed through unchanged. The orchestrator surfaces
    /// this as a degraded-mode warning.
    pub passthrough: bool,
}

/// Block-scoped decompression failure. The block is dropped; the run
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// Corrupt or truncated compressed stream.
    CodecFailed { codec: &'static str, msg: String },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionError::CodecFailed { codec, msg } => {
                write!(f, "codec {} failed: {}", codec, msg)
            }
        }
    }
}

impl std::error::Error for CompressionError {}
