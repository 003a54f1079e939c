//! Cursor-driven decoding of the flat record stream inside one decompressed
//! block.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::{DecoderConfig, Endianness};
use crate::constants::{tlv_ids, TLV_HEADER_LEN};
use crate::tlv::types::{
    DecodedRecord, RecordData, RecordError, TlvOutcome, TlvType, TlvWarning,
};

/// Decoder for one block's record stream.
///
/// Timestamp scope: a TIMESTAMP record applies to itself and propagates to
/// every later record in the same block; state resets at block boundaries so
/// blocks decode independently (which also keeps the parallel pipeline
/// bit-identical to the sequential one). Records seen before any TIMESTAMP
/// carry `fallback_timestamp`, normally captured once at pipeline start (a
/// documented imprecision, not a correctness guarantee).
pub struct TlvDecoder {
    byte_order: Endianness,
    alignment: usize,
    fallback_timestamp: DateTime<Utc>,
}

impl TlvDecoder {
    pub fn new(config: &DecoderConfig, fallback_timestamp: DateTime<Utc>) -> Self {
        Self {
            byte_order: config.byte_order,
            alignment: config.alignment,
            fallback_timestamp,
        }
    }

    /// Walk the buffer from offset 0, decoding records until a clean end of
    /// stream or a truncated trailing record.
    pub fn decode_block(&self, data: &[u8]) -> TlvOutcome {
        let mut outcome = TlvOutcome::default();
        let mut current_timestamp: Option<DateTime<Utc>> = None;
        let mut offset = 0usize;

        while offset + TLV_HEADER_LEN <= data.len() {
            let tlv_type = self.byte_order.read_u16(&data[offset..offset + 2]);
            let tlv_length = self.byte_order.read_u16(&data[offset + 2..offset + 4]) as usize;

            let payload_start = offset + TLV_HEADER_LEN;
            let payload_end = payload_start + tlv_length;
            if payload_end > data.len() {
                let available = data.len() - payload_start;
                warn!(offset, tlv_type, declared = tlv_length, available, "truncated trailing record");
                outcome.warnings.push(TlvWarning::TruncatedRecord {
                    offset,
                    tlv_type,
                    declared: tlv_length,
                    available,
                });
                break;
            }
            let payload = &data[payload_start..payload_end];

            match self.decode_record(tlv_type, tlv_length as u16, payload, offset, &mut current_timestamp) {
                Ok(record) => outcome.records.push(record),
                Err(err) => {
                    warn!(%err, "dropping record");
                    outcome.errors.push(err);
                }
            }

            // Pad the cursor to the next alignment boundary before the next
            // header read.
            offset = payload_end + padding(payload_end, self.alignment);
        }

        debug!(
            records = outcome.records.len(),
            errors = outcome.errors.len(),
            "tlv block decoded"
        );
        outcome
    }

    fn decode_record(
        &self,
        tlv_type: u16,
        tlv_length: u16,
        payload: &[u8],
        offset: usize,
        current: &mut Option<DateTime<Utc>>,
    ) -> Result<DecodedRecord, RecordError> {
        let data = match TlvType::try_from(tlv_type) {
            Ok(TlvType::Imu) => self.decode_imu(payload, offset)?,
            Ok(TlvType::Temperature) => self.decode_temperature(payload, offset)?,
            Ok(TlvType::Health) => self.decode_health(payload, offset)?,
            Ok(TlvType::SessionMetadata) => self.decode_session_metadata(payload),
            Ok(TlvType::Timestamp) => self.decode_timestamp(payload, offset, current)?,
            Err(_) => {
                debug!(tlv_type, len = payload.len(), "unknown record type, capturing payload verbatim");
                RecordData::Unknown { raw_payload: hex::encode(payload) }
            }
        };

        Ok(DecodedRecord {
            // A TIMESTAMP record has already updated `current`, so it is
            // stamped with its own value.
            timestamp: current.unwrap_or(self.fallback_timestamp),
            data,
            raw_tlv_type: tlv_type,
            raw_tlv_length: tlv_length,
        })
    }

    /// IMU: exactly six 32-bit floats, accel then gyro.
    fn decode_imu(&self, payload: &[u8], offset: usize) -> Result<RecordData, RecordError> {
        if payload.len() < 24 {
            return Err(RecordError::ShortPayload {
                tlv_type: tlv_ids::IMU,
                offset,
                expected: 24,
                actual: payload.len(),
            });
        }
        Ok(RecordData::Imu {
            accel_x: self.byte_order.read_f32(&payload[0..4]),
            accel_y: self.byte_order.read_f32(&payload[4..8]),
            accel_z: self.byte_order.read_f32(&payload[8..12]),
            gyro_x: self.byte_order.read_f32(&payload[12..16]),
            gyro_y: self.byte_order.read_f32(&payload[16..20]),
            gyro_z: self.byte_order.read_f32(&payload[20..24]),
        })
    }

    /// Temperature: float32 reading plus uint32 sensor id.
    fn decode_temperature(&self, payload: &[u8], offset: usize) -> Result<RecordData, RecordError> {
        if payload.len() < 8 {
            return Err(RecordError::ShortPayload {
                tlv_type: tlv_ids::TEMPERATURE,
                offset,
                expected: 8,
                actual: payload.len(),
            });
        }
        Ok(RecordData::Temperature {
            temperature: self.byte_order.read_f32(&payload[0..4]),
            sensor_id: self.byte_order.read_u32(&payload[4..8]),
        })
    }

    /// Health: battery voltage, CPU temperature, memory usage, error code.
    fn decode_health(&self, payload: &[u8], offset: usize) -> Result<RecordData, RecordError> {
        if payload.len() < 16 {
            return Err(RecordError::ShortPayload {
                tlv_type: tlv_ids::HEALTH,
                offset,
                expected: 16,
                actual: payload.len(),
            });
        }
        Ok(RecordData::Health {
            battery_voltage: self.byte_order.read_f32(&payload[0..4]),
            cpu_temperature: self.byte_order.read_f32(&payload[4..8]),
            memory_usage: self.byte_order.read_u32(&payload[8..12]),
            error_code: self.byte_order.read_u32(&payload[12..16]),
        })
    }

    /// Session metadata degrades instead of failing: whatever trailing
    /// fields the payload is too short for simply come back absent.
    fn decode_session_metadata(&self, payload: &[u8]) -> RecordData {
        let session_id = (payload.len() >= 16).then(|| hex::encode_upper(&payload[..16]));
        let firmware_version =
            (payload.len() >= 20).then(|| self.byte_order.read_u32(&payload[16..20]));
        RecordData::SessionMetadata { session_id, firmware_version }
    }

    fn decode_timestamp(
        &self,
        payload: &[u8],
        offset: usize,
        current: &mut Option<DateTime<Utc>>,
    ) -> Result<RecordData, RecordError> {
        if payload.len() < 8 {
            return Err(RecordError::ShortPayload {
                tlv_type: tlv_ids::TIMESTAMP,
                offset,
                expected: 8,
                actual: payload.len(),
            });
        }
        let timestamp_us = self.byte_order.read_u64(&payload[..8]);
        let ts = i64::try_from(timestamp_us)
            .ok()
            .and_then(DateTime::from_timestamp_micros)
            .ok_or(RecordError::TimestampOutOfRange { offset, timestamp_us })?;

        *current = Some(ts);
        Ok(RecordData::Timestamp { timestamp_us })
    }
}

fn padding(offset: usize, alignment: usize) -> usize {
    (alignment - offset % alignment) % alignment
}
