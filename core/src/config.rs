//! Decoder configuration.
//!
//! Every knob is an explicit immutable value handed to components at
//! construction. Nothing is content-sniffed from the input and nothing
//! lives in ambient global state.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::Deserialize;

use crate::constants::DEFAULT_ALIGNMENT;
use crate::error::DecodeError;

/// Compression algorithm applied to every block payload in a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    Lz4,
    /// Reserved. No decompressor is wired up yet; payloads pass through
    /// unchanged and the pipeline reports a degraded-mode warning.
    Heatshrink,
}

/// Byte order for TLV headers and record payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    pub fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(buf),
            Endianness::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_u64(self, buf: &[u8]) -> u64 {
        match self {
            Endianness::Little => LittleEndian::read_u64(buf),
            Endianness::Big => BigEndian::read_u64(buf),
        }
    }

    pub fn read_f32(self, buf: &[u8]) -> f32 {
        match self {
            Endianness::Little => LittleEndian::read_f32(buf),
            Endianness::Big => BigEndian::read_f32(buf),
        }
    }
}

/// Framing leniency for malformed block boundaries.
///
/// `Lenient` mirrors the device's observed behavior: truncate an overrunning
/// payload to the available bytes, warn, and keep going. `Strict` treats the
/// same conditions as errors and stops the scan, since every later offset is
/// derived from the corrupt length field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FramingPolicy {
    Lenient,
    Strict,
}

/// Immutable configuration for one decode run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub compression: CompressionAlgorithm,
    pub byte_order: Endianness,
    /// TLV cursor alignment in bytes. The cursor pads to the next multiple
    /// of this after every record.
    pub alignment: usize,
    pub framing: FramingPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            compression: CompressionAlgorithm::Lz4,
            byte_order: Endianness::Little,
            alignment: DEFAULT_ALIGNMENT,
            framing: FramingPolicy::Lenient,
        }
    }
}

impl DecoderConfig {
    /// Reject configurations the decoder cannot run with. Configuration
    /// mistakes are the one class of error that is fatal up front.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.alignment == 0 {
            return Err(DecodeError::Config("alignment must be at least 1".into()));
        }
        Ok(())
    }
}
