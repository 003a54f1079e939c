//! Parallel per-block decoding with an order-preserving merge.
//!
//! Framing is an inherently forward-only scan (block N+1's offset is only
//! known after block N's header), so it runs first on the calling thread.
//! Decrypt → decompress → decode is then independent across blocks and fans
//! out over scoped workers via bounded channels. Completions are buffered by
//! block index and merged in order, so the report is identical to the
//! sequential pipeline's for any input.

use std::collections::BTreeMap;
use std::thread;

use chrono::Utc;
use crossbeam::channel::bounded;
use tracing::debug;

use crate::crypto::KeyProvider;
use crate::framing::RawBlock;
use crate::pipeline::report::DecodeReport;
use crate::pipeline::{finish, merge_block, BlockIssue, BlockOutcome, Pipeline};
use crate::tlv::TlvDecoder;

impl<K: KeyProvider> Pipeline<K> {
    /// Decode with per-block work spread over `workers` threads (`None`
    /// means one per available CPU).
    pub fn decode_parallel(&self, raw: &[u8], workers: Option<usize>) -> DecodeReport {
        let workers = workers.unwrap_or_else(num_cpus::get).max(1);
        let mut report = DecodeReport::default();
        let decoder = TlvDecoder::new(self.config(), Utc::now());

        let Some(scan) = self.scan(raw, &mut report) else {
            return report;
        };
        if scan.blocks.is_empty() {
            finish(&mut report);
            return report;
        }

        let blocks = scan.blocks;
        debug!(blocks = blocks.len(), workers, "dispatching blocks to workers");

        let (task_tx, task_rx) = bounded::<RawBlock<'_>>(workers * 2);
        let (out_tx, out_rx) = bounded::<(usize, Result<BlockOutcome, BlockIssue>)>(workers * 2);

        thread::scope(|scope| {
            // ---- Feeder ----
            scope.spawn(move || {
                for block in blocks {
                    if task_tx.send(block).is_err() {
                        break;
                    }
                }
                // Dropping task_tx closes the channel.
            });

            // ---- Workers ----
            for _ in 0..workers {
                let rx = task_rx.clone();
                let tx = out_tx.clone();
                let decoder = &decoder;
                scope.spawn(move || {
                    for block in rx.iter() {
                        let outcome = self.process_block(&block, decoder);
                        if tx.send((block.index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(task_rx);
            drop(out_tx);

            // ---- Ordered merge ----
            // Buffer out-of-order completions until their turn; merged order
            // must match original block order for determinism.
            let mut next = 0usize;
            let mut pending: BTreeMap<usize, Result<BlockOutcome, BlockIssue>> = BTreeMap::new();
            for (index, outcome) in out_rx.iter() {
                pending.insert(index, outcome);
                while let Some(ready) = pending.remove(&next) {
                    merge_block(&mut report, next, ready);
                    next += 1;
                }
            }
            while let Some(ready) = pending.remove(&next) {
                merge_block(&mut report, next, ready);
                next += 1;
            }
        });

        finish(&mut report);
        report
    }
}
