// src/processing/parallel.rs
use anyhow::Result;
use flume::{Receiver, Sender};
use tracing::debug;

use crate::processing::sample::{ProcessError, SampleStack};
use crate::products::ProductSpec;
use crate::utils::quantize::PixelCode;

/// Pixels per work unit.
const BLOCK_SIZE: usize = 4096;

type BlockResult = (usize, Result<Vec<PixelCode>, ProcessError>);

/// Block-parallel evaluator for one product over a materialized pixel
/// array. Work units stream through a channel as they finish and are
/// reassembled in block order, so the output is identical whatever the
/// pool size or completion order.
pub struct ParallelProcessor {
    threads: usize,
    pool: rayon::ThreadPool,
}

impl ParallelProcessor {
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(Self { threads, pool })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn process(
        &self,
        product: &ProductSpec,
        pixels: &[SampleStack],
    ) -> Result<Vec<PixelCode>> {
        let num_blocks = pixels.len().div_ceil(BLOCK_SIZE);
        debug!(
            product = product.id,
            pixels = pixels.len(),
            blocks = num_blocks,
            threads = self.threads,
            "dispatching pixel blocks"
        );

        let (tx, rx): (Sender<BlockResult>, Receiver<BlockResult>) = flume::unbounded();

        self.pool.scope(|scope| {
            for (idx, block) in pixels.chunks(BLOCK_SIZE).enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = block
                        .iter()
                        .map(|stack| product.evaluate(stack).map(|r| product.encode(r)))
                        .collect();
                    // receiver only disappears if the caller already gave up
                    let _ = tx.send((idx, result));
                });
            }
        });
        drop(tx);

        // Reassemble in block order; the first bad sample fails the job and
        // the caller decides whole-image policy.
        let mut blocks: Vec<Option<Vec<PixelCode>>> = vec![None; num_blocks];
        for (idx, result) in rx {
            blocks[idx] = Some(result?);
        }

        Ok(blocks.into_iter().flatten().flatten().collect())
    }
}
