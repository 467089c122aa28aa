//! Worker thread implementation
//!
//! Each worker independently derives its owned chunk range from
//! `(chunk_count, worker_count, worker_index)` and runs a write or read pass
//! over it through its own storage engine instance. Workers share no mutable
//! state: the partition is a pure function, the random generator is seeded
//! per worker, and statistics flow back over a channel only when the worker
//! finishes.
//!
//! # Access order
//!
//! Within its owned range a worker visits chunks in ascending id order or in
//! a seeded random permutation, so multi-worker runs remain reproducible for
//! a fixed base seed.

use crate::config::{AccessOrder, BenchConfig};
use crate::engine::{self, ArrayEngine};
use crate::error::{Result, TileBenchError};
use crate::layout::{ChunkBuffer, CELL_BYTES};
use crate::partition::{self, ChunkRange};
use crate::stats::{OpType, WorkerStats};
use crate::tiler::{ChunkId, Tiling};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Benchmark pass executed by a worker over its owned chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Fill every owned chunk with the synthetic pattern and write it
    Write,
    /// Read every owned chunk back, optionally verifying the pattern
    Read { verify: bool },
}

/// Worker executing one pass over its owned chunk range
pub struct Worker {
    id: usize,
    config: Arc<BenchConfig>,
    tiling: Tiling,
    engine: Box<dyn ArrayEngine>,
    stats: WorkerStats,
    rng: Xoshiro256PlusPlus,
}

impl Worker {
    /// Create a worker owning its own engine instance
    pub fn new(id: usize, config: Arc<BenchConfig>, engine: Box<dyn ArrayEngine>) -> Result<Self> {
        let tiling = config.tiling()?;
        let rng = Xoshiro256PlusPlus::seed_from_u64(config.workers.seed + id as u64);
        Ok(Self {
            id,
            config,
            tiling,
            engine,
            stats: WorkerStats::new(id),
            rng,
        })
    }

    /// Run the pass to completion and return the collected statistics
    ///
    /// Fails fast: the first engine error aborts the pass. Verification
    /// mismatches are counted rather than aborting, so a corrupted store
    /// reports every bad chunk in one pass.
    pub fn run(mut self, pass: Pass) -> Result<WorkerStats> {
        let range = partition::plan_worker(
            self.tiling.chunk_count(),
            self.config.workers.count as u64,
            self.id as u64,
        )?;
        let domain = self.tiling.domain();

        for id in self.visit_order(&range) {
            let rect = self.tiling.rectangle_of(id)?;
            match pass {
                Pass::Write => {
                    let buf = ChunkBuffer::fill_synthetic(&domain, &rect);
                    let start = Instant::now();
                    self.engine.write(&rect, buf.values())?;
                    self.stats
                        .record_io(OpType::Write, buf.byte_len() as u64, start.elapsed());
                }
                Pass::Read { verify } => {
                    let start = Instant::now();
                    let values = self.engine.read(&rect)?;
                    let elapsed = start.elapsed();
                    self.stats
                        .record_io(OpType::Read, (values.len() * CELL_BYTES) as u64, elapsed);
                    if verify {
                        let buf = ChunkBuffer::from_values(&rect, values)?;
                        if let Some((row, col, expected, actual)) = buf.first_mismatch(&domain) {
                            self.stats.record_verify_failure();
                            eprintln!(
                                "worker {}: chunk {} mismatch at ({}, {}): expected {}, got {}",
                                self.id, id, row, col, expected, actual
                            );
                        }
                    }
                }
            }
        }
        Ok(self.stats)
    }

    fn visit_order(&mut self, range: &ChunkRange) -> Vec<ChunkId> {
        let mut ids: Vec<ChunkId> = range.iter().collect();
        if self.config.access.order == AccessOrder::Random {
            ids.shuffle(&mut self.rng);
        }
        ids
    }
}

/// Run one pass across all configured workers and collect their statistics
///
/// Validates the partition before spawning so a bad worker count fails fast.
/// Each thread builds its own engine instance; results come back over a
/// channel and the first worker error (or panic) aborts the run.
pub fn run_pass(config: Arc<BenchConfig>, pass: Pass) -> Result<Vec<WorkerStats>> {
    let tiling = config.tiling()?;
    partition::plan(tiling.chunk_count(), config.workers.count as u64)?;

    let (tx, rx) = crossbeam::channel::unbounded::<Result<WorkerStats>>();
    let mut handles = Vec::with_capacity(config.workers.count);

    for id in 0..config.workers.count {
        let tx = tx.clone();
        let config = Arc::clone(&config);
        let handle = thread::Builder::new()
            .name(format!("tilebench-worker-{}", id))
            .spawn(move || {
                let result = engine::create_engine(
                    config.engine.kind,
                    &tiling,
                    config.engine.path.as_deref(),
                )
                .and_then(|engine| Worker::new(id, config, engine)?.run(pass));
                // The receiver only disappears if the driver already failed
                let _ = tx.send(result);
            })?;
        handles.push(handle);
    }
    drop(tx);

    let mut stats = Vec::with_capacity(handles.len());
    for result in rx.iter() {
        stats.push(result?);
    }
    for handle in handles {
        handle.join().map_err(|_| {
            TileBenchError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "worker thread panicked",
            ))
        })?;
    }

    stats.sort_by_key(|s| s.worker_id());
    Ok(stats)
}
