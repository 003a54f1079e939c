//! sbw-core
//!
//! Decode pipeline for SBW device log files: block framing, authenticated
//! decryption, decompression, and TLV record decoding over a fully resident
//! byte buffer. File I/O, export, and the command-line surface live in the
//! `sbw-cli` crate.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod error;

// Pipeline stages, leaves first
pub mod framing;
pub mod crypto;
pub mod compression;
pub mod tlv;

// Orchestration
pub mod pipeline;

pub use config::{CompressionAlgorithm, DecoderConfig, Endianness, FramingPolicy};
pub use crypto::{KeyProvider, StaticKey};
pub use error::DecodeError;
pub use pipeline::{BlockIssue, DecodeReport, Pipeline, Stage};
pub use tlv::{DecodedRecord, RecordData};
