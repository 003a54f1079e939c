//! Aggregate result of decoding one file.

use std::fmt;

use serde::Serialize;

use crate::tlv::DecodedRecord;

/// Pipeline stage a diagnostic originated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Framing,
    Decrypt,
    Decompress,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Framing => "framing",
            Stage::Decrypt => "decrypt",
            Stage::Decompress => "decompress",
            Stage::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// One block- or record-scoped diagnostic. `block_index` is `None` for
/// scan-level framing issues not tied to a parsed block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlockIssue {
    pub block_index: Option<usize>,
    pub stage: Stage,
    pub message: String,
}

impl BlockIssue {
    pub fn new(block_index: impl Into<Option<usize>>, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            block_index: block_index.into(),
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for BlockIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_index {
            Some(index) => write!(f, "block {} [{}]: {}", index, self.stage, self.message),
            None => write!(f, "[{}]: {}", self.stage, self.message),
        }
    }
}

/// Ordered records plus counts and diagnostics for one decoded file.
///
/// Records, errors, and warnings each preserve original block order; the
/// record list is append-only for the rest of the run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DecodeReport {
    pub records: Vec<DecodedRecord>,
    pub blocks_seen: usize,
    pub blocks_processed: usize,
    pub errors: Vec<BlockIssue>,
    pub warnings: Vec<BlockIssue>,
}

impl DecodeReport {
    /// A run fails as a whole only when nothing at all was decoded; every
    /// other failure is block- or record-scoped and already recorded.
    pub fn success(&self) -> bool {
        !self.records.is_empty()
    }
}
