//! Restores decrypted payloads to raw record bytes.
//!
//! The algorithm is a run-wide configuration value, never sniffed from the
//! content: the device and the decoder agree on it out of band.

use std::io::Read;

use lz4_flex::frame::FrameDecoder;
use tracing::{debug, warn};

use crate::compression::types::{CompressionError, Decompressed};
use crate::config::CompressionAlgorithm;

/// Decompress one decrypted block payload.
pub fn decompress_block(
    algorithm: CompressionAlgorithm,
    input: &[u8],
) -> Result<Decompressed, CompressionError> {
    match algorithm {
        CompressionAlgorithm::Lz4 => decompress_lz4(input),
        CompressionAlgorithm::Heatshrink => {
            // No codec is wired up yet: hand the bytes through so the rest
            // of the block still decodes, and let the orchestrator warn.
            warn!(len = input.len(), "heatshrink decompression not implemented, passing data through");
            Ok(Decompressed { data: input.to_vec(), passthrough: true })
        }
    }
}

fn decompress_lz4(input: &[u8]) -> Result<Decompressed, CompressionError> {
    let mut decoder = FrameDecoder::new(input);
    let mut data = Vec::new();
    decoder
        .read_to_end(&mut data)
        .map_err(|e| CompressionError::CodecFailed { codec: "lz4", msg: e.to_string() })?;

    debug!(compressed = input.len(), raw = data.len(), "lz4 frame decompressed");
    Ok(Decompressed { data, passthrough: false })
}
