use std::fmt;

use chrono::{DateTime, Utc};
use num_enum::TryFromPrimitive;
use serde::Serialize;

use crate::constants::tlv_ids;

/// Registered TLV record types.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum TlvType {
    Imu = tlv_ids::IMU,
    Temperature = tlv_ids::TEMPERATURE,
    Health = tlv_ids::HEALTH,
    SessionMetadata = tlv_ids::SESSION_METADATA,
    Timestamp = tlv_ids::TIMESTAMP,
}

/// Decoded record payload: a closed variant per registered type, each with
/// a fixed field set. Unregistered types keep their payload verbatim as hex
/// and are never dropped.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "data_type", rename_all = "snake_case")]
pub enum RecordData {
    Imu {
        accel_x: f32,
        accel_y: f32,
        accel_z: f32,
        gyro_x: f32,
        gyro_y: f32,
        gyro_z: f32,
    },
    Temperature {
        temperature: f32,
        sensor_id: u32,
    },
    Health {
        battery_voltage: f32,
        cpu_temperature: f32,
        memory_usage: u32,
        error_code: u32,
    },
    SessionMetadata {
        /// Opaque 16-byte id rendered as uppercase hex. Absent when the
        /// payload is too short to hold it.
        session_id: Option<String>,
        /// Rendered `0xXXXXXXXX` by exporters, "Unknown" when absent.
        firmware_version: Option<u32>,
    },
    Timestamp {
        /// Microseconds since the Unix epoch.
        timestamp_us: u64,
    },
    Unknown {
        /// Lowercase hex of the raw payload.
        raw_payload: String,
    },
}

impl RecordData {
    /// Stable lowercase name used for grouping and export file naming.
    pub fn type_name(&self) -> &'static str {
        match self {
            RecordData::Imu { .. } => "imu",
            RecordData::Temperature { .. } => "temperature",
            RecordData::Health { .. } => "health",
            RecordData::SessionMetadata { .. } => "session_metadata",
            RecordData::Timestamp { .. } => "timestamp",
            RecordData::Unknown { .. } => "unknown",
        }
    }
}

/// One decoded record with its wire-level provenance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecodedRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub data: RecordData,
    pub raw_tlv_type: u16,
    pub raw_tlv_length: u16,
}

/// Record-scoped decode failures. The offending record is dropped; the
/// cursor keeps walking the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Payload shorter than the type's fixed field set requires.
    ShortPayload {
        tlv_type: u16,
        offset: usize,
        expected: usize,
        actual: usize,
    },

    /// Timestamp outside the representable range.
    TimestampOutOfRange { offset: usize, timestamp_us: u64 },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::ShortPayload { tlv_type, offset, expected, actual } => {
                write!(
                    f,
                    "record type 0x{:04X} at offset {}: payload {} bytes, expected at least {}",
                    tlv_type, offset, actual, expected
                )
            }
            RecordError::TimestampOutOfRange { offset, timestamp_us } => {
                write!(f, "timestamp record at offset {}: {} us is out of range", offset, timestamp_us)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Non-fatal block-level TLV diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlvWarning {
    /// Final record's declared length runs past the end of the block; the
    /// cursor stops and everything decoded so far is kept.
    TruncatedRecord {
        offset: usize,
        tlv_type: u16,
        declared: usize,
        available: usize,
    },
}

impl fmt::Display for TlvWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlvWarning::TruncatedRecord { offset, tlv_type, declared, available } => {
                write!(
                    f,
                    "truncated trailing record type 0x{:04X} at offset {}: declares {} bytes, {} available",
                    tlv_type, offset, declared, available
                )
            }
        }
    }
}

/// Result of decoding one decompressed block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TlvOutcome {
    pub records: Vec<DecodedRecord>,
    pub errors: Vec<RecordError>,
    pub warnings: Vec<TlvWarning>,
}
