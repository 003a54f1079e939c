//! CSV and JSON export of decoded records.
//!
//! CSV output is grouped per record type, one file each, matching the
//! layout downstream analysis scripts already consume.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use sbw_core::{BlockIssue, DecodeReport, DecodedRecord, RecordData};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const TYPE_NAMES: [&str; 6] = [
    "imu",
    "temperature",
    "health",
    "session_metadata",
    "timestamp",
    "unknown",
];

/// Write one `<type>_data.csv` per record type present. Returns the number
/// of files created.
pub fn write_csv(records: &[DecodedRecord], out_dir: &Path) -> Result<usize> {
    let mut created = 0;
    for type_name in TYPE_NAMES {
        let group: Vec<&DecodedRecord> = records
            .iter()
            .filter(|r| r.data.type_name() == type_name)
            .collect();
        if group.is_empty() {
            continue;
        }

        let path = out_dir.join(format!("{type_name}_data.csv"));
        write_group(&group, &path)?;
        info!(path = %path.display(), rows = group.len(), "wrote csv");
        created += 1;
    }
    Ok(created)
}

fn write_group(records: &[&DecodedRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    // Groups are homogeneous, so the first record picks the column set.
    match records[0].data {
        RecordData::Imu { .. } => {
            writer.write_record([
                "timestamp", "accel_x", "accel_y", "accel_z", "gyro_x", "gyro_y", "gyro_z",
            ])?;
            for r in records {
                if let RecordData::Imu { accel_x, accel_y, accel_z, gyro_x, gyro_y, gyro_z } =
                    r.data
                {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        accel_x.to_string(),
                        accel_y.to_string(),
                        accel_z.to_string(),
                        gyro_x.to_string(),
                        gyro_y.to_string(),
                        gyro_z.to_string(),
                    ])?;
                }
            }
        }
        RecordData::Temperature { .. } => {
            writer.write_record(["timestamp", "temperature", "sensor_id"])?;
            for r in records {
                if let RecordData::Temperature { temperature, sensor_id } = r.data {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        temperature.to_string(),
                        sensor_id.to_string(),
                    ])?;
                }
            }
        }
        RecordData::Health { .. } => {
            writer.write_record([
                "timestamp", "battery_voltage", "cpu_temperature", "memory_usage", "error_code",
            ])?;
            for r in records {
                if let RecordData::Health {
                    battery_voltage,
                    cpu_temperature,
                    memory_usage,
                    error_code,
                } = r.data
                {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        battery_voltage.to_string(),
                        cpu_temperature.to_string(),
                        memory_usage.to_string(),
                        error_code.to_string(),
                    ])?;
                }
            }
        }
        RecordData::SessionMetadata { .. } => {
            writer.write_record(["timestamp", "session_id", "firmware_version"])?;
            for r in records {
                if let RecordData::SessionMetadata { session_id, firmware_version } = &r.data {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        session_id.clone().unwrap_or_else(|| "Unknown".into()),
                        firmware_version
                            .map(|fw| format!("0x{fw:08X}"))
                            .unwrap_or_else(|| "Unknown".into()),
                    ])?;
                }
            }
        }
        RecordData::Timestamp { .. } => {
            writer.write_record(["timestamp", "timestamp_us"])?;
            for r in records {
                if let RecordData::Timestamp { timestamp_us } = r.data {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        timestamp_us.to_string(),
                    ])?;
                }
            }
        }
        RecordData::Unknown { .. } => {
            writer.write_record(["timestamp", "raw_tlv_type", "raw_tlv_length", "raw_payload"])?;
            for r in records {
                if let RecordData::Unknown { raw_payload } = &r.data {
                    writer.write_record([
                        format_timestamp(&r.timestamp),
                        format!("0x{:04X}", r.raw_tlv_type),
                        r.raw_tlv_length.to_string(),
                        raw_payload.clone(),
                    ])?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    blocks_seen: usize,
    blocks_processed: usize,
    record_count: usize,
    errors: &'a [BlockIssue],
    warnings: &'a [BlockIssue],
    records: &'a [DecodedRecord],
}

/// Write the complete dump: every record plus the report's counts and
/// diagnostics.
pub fn write_json(report: &DecodeReport, out_dir: &Path) -> Result<usize> {
    let path = out_dir.join("sbw_data_complete.json");
    let export = JsonExport {
        blocks_seen: report.blocks_seen,
        blocks_processed: report.blocks_processed,
        record_count: report.records.len(),
        errors: &report.errors,
        warnings: &report.warnings,
        records: &report.records,
    };

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), records = report.records.len(), "wrote json");
    Ok(1)
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
