//! Self-describing TLV record decoding.

pub mod decode;
pub mod types;

pub use decode::TlvDecoder;
pub use types::{
    DecodedRecord, RecordData, RecordError, TlvOutcome, TlvType, TlvWarning,
};
