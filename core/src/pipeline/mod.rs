//! Pipeline orchestration: framer → decryptor → decompressor → TLV decoder,
//! in strict file order, with per-block error isolation.

pub mod parallel;
pub mod report;

pub use report::{BlockIssue, DecodeReport, Stage};

use chrono::Utc;
use tracing::{info, warn};

use crate::compression::decompress_block;
use crate::config::DecoderConfig;
use crate::crypto::{BlockDecryptor, KeyProvider};
use crate::error::DecodeError;
use crate::framing::{scan_blocks, RawBlock, ScanOutcome};
use crate::tlv::{TlvDecoder, TlvOutcome};

/// Full decode pipeline over an in-memory file image.
pub struct Pipeline<K: KeyProvider> {
    config: DecoderConfig,
    decryptor: BlockDecryptor<K>,
}

/// Everything one block contributes before it is merged into the report.
pub(crate) struct BlockOutcome {
    tlv: TlvOutcome,
    passthrough: bool,
}

impl<K: KeyProvider> Pipeline<K> {
    pub fn new(config: DecoderConfig, keys: K) -> Result<Self, DecodeError> {
        config.validate()?;
        Ok(Self { config, decryptor: BlockDecryptor::new(keys) })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode every block in file order on the calling thread.
    pub fn decode(&self, raw: &[u8]) -> DecodeReport {
        let mut report = DecodeReport::default();
        let decoder = TlvDecoder::new(&self.config, Utc::now());

        let Some(scan) = self.scan(raw, &mut report) else {
            return report;
        };

        for block in &scan.blocks {
            let outcome = self.process_block(block, &decoder);
            merge_block(&mut report, block.index, outcome);
        }

        finish(&mut report);
        report
    }

    /// Run the framing scan and fold its diagnostics into the report.
    /// `None` means a strict-policy framing error already ended the run.
    pub(crate) fn scan<'a>(
        &self,
        raw: &'a [u8],
        report: &mut DecodeReport,
    ) -> Option<ScanOutcome<'a>> {
        let scan = match scan_blocks(raw, self.config.framing) {
            Ok(scan) => scan,
            Err(err) => {
                report
                    .errors
                    .push(BlockIssue::new(err.block_index(), Stage::Framing, err.to_string()));
                return None;
            }
        };
        for warning in &scan.warnings {
            report.warnings.push(BlockIssue::new(None, Stage::Framing, warning.to_string()));
        }
        report.blocks_seen = scan.blocks.len();
        info!(blocks = scan.blocks.len(), "framing scan complete");
        Some(scan)
    }

    /// Decrypt → decompress → decode one block. A failed stage skips the
    /// remaining stages for this block only.
    pub(crate) fn process_block(
        &self,
        block: &RawBlock<'_>,
        decoder: &TlvDecoder,
    ) -> Result<BlockOutcome, BlockIssue> {
        let plaintext = self
            .decryptor
            .decrypt(block.header.block_id, block.header.nonce_size as usize, block.payload)
            .map_err(|e| BlockIssue::new(block.index, Stage::Decrypt, e.to_string()))?;

        let decompressed = decompress_block(self.config.compression, &plaintext)
            .map_err(|e| BlockIssue::new(block.index, Stage::Decompress, e.to_string()))?;

        let tlv = decoder.decode_block(&decompressed.data);
        Ok(BlockOutcome { tlv, passthrough: decompressed.passthrough })
    }
}

/// Fold one block's outcome into the report, preserving block order.
pub(crate) fn merge_block(
    report: &mut DecodeReport,
    index: usize,
    outcome: Result<BlockOutcome, BlockIssue>,
) {
    match outcome {
        Ok(outcome) => {
            if outcome.passthrough {
                report.warnings.push(BlockIssue::new(
                    index,
                    Stage::Decompress,
                    "configured algorithm has no decompressor, payload passed through unchanged",
                ));
            }
            for err in outcome.tlv.errors {
                report.errors.push(BlockIssue::new(index, Stage::Decode, err.to_string()));
            }
            for warning in outcome.tlv.warnings {
                report.warnings.push(BlockIssue::new(index, Stage::Decode, warning.to_string()));
            }
            if outcome.tlv.records.is_empty() {
                report.warnings.push(BlockIssue::new(index, Stage::Decode, "no records decoded from block"));
            }
            report.records.extend(outcome.tlv.records);
            report.blocks_processed += 1;
        }
        Err(issue) => {
            warn!(%issue, "block dropped");
            report.errors.push(issue);
        }
    }
}

pub(crate) fn finish(report: &mut DecodeReport) {
    info!(
        blocks_seen = report.blocks_seen,
        blocks_processed = report.blocks_processed,
        records = report.records.len(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "decode finished"
    );
    if !report.success() {
        warn!("no records decoded from any block");
    }
}
