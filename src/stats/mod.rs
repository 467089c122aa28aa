//! Statistics collection
//!
//! Per-worker operation counters and latency histograms, plus an aggregate
//! run report. Each worker owns its own [`WorkerStats`] and communicates only
//! through the returned value, so no locking is needed on the hot path; the
//! driver merges worker stats after all threads have finished.
//!
//! Latencies are recorded in microseconds into an HdrHistogram, which keeps
//! high-precision percentiles without storing individual samples.

use hdrhistogram::Histogram;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Type of a recorded benchmark operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpType {
    Read,
    Write,
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpType::Read => write!(f, "read"),
            OpType::Write => write!(f, "write"),
        }
    }
}

/// Statistics collected by one worker
#[derive(Debug)]
pub struct WorkerStats {
    worker_id: usize,
    read_ops: u64,
    write_ops: u64,
    read_bytes: u64,
    write_bytes: u64,
    verify_failures: u64,
    /// Operation latencies in microseconds
    latency: Histogram<u64>,
}

impl WorkerStats {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            read_ops: 0,
            write_ops: 0,
            read_bytes: 0,
            write_bytes: 0,
            verify_failures: 0,
            // 3 significant figures, auto-resizing; creation only fails for
            // sigfig values outside 0..=5
            latency: Histogram::new(3).expect("valid histogram sigfigs"),
        }
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Record one completed operation
    pub fn record_io(&mut self, op: OpType, bytes: u64, latency: Duration) {
        match op {
            OpType::Read => {
                self.read_ops += 1;
                self.read_bytes += bytes;
            }
            OpType::Write => {
                self.write_ops += 1;
                self.write_bytes += bytes;
            }
        }
        let micros = latency.as_micros().min(u128::from(u64::MAX)) as u64;
        // auto-resize makes record infallible in practice
        let _ = self.latency.record(micros);
    }

    /// Record one chunk that failed pattern verification
    pub fn record_verify_failure(&mut self) {
        self.verify_failures += 1;
    }

    pub fn read_ops(&self) -> u64 {
        self.read_ops
    }

    pub fn write_ops(&self) -> u64 {
        self.write_ops
    }

    pub fn total_ops(&self) -> u64 {
        self.read_ops + self.write_ops
    }

    pub fn read_bytes(&self) -> u64 {
        self.read_bytes
    }

    pub fn write_bytes(&self) -> u64 {
        self.write_bytes
    }

    pub fn total_bytes(&self) -> u64 {
        self.read_bytes + self.write_bytes
    }

    pub fn verify_failures(&self) -> u64 {
        self.verify_failures
    }

    /// Latency value at the given quantile, in microseconds
    pub fn latency_at_quantile(&self, q: f64) -> u64 {
        self.latency.value_at_quantile(q)
    }

    /// Maximum recorded latency, in microseconds
    pub fn max_latency_us(&self) -> u64 {
        self.latency.max()
    }

    /// Fold another worker's statistics into this one
    pub fn merge(&mut self, other: &WorkerStats) {
        self.read_ops += other.read_ops;
        self.write_ops += other.write_ops;
        self.read_bytes += other.read_bytes;
        self.write_bytes += other.write_bytes;
        self.verify_failures += other.verify_failures;
        self.latency
            .add(&other.latency)
            .expect("merge auto-resizing latency histograms");
    }
}

/// Aggregate report for one benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub workers: usize,
    pub elapsed_secs: f64,
    pub read_ops: u64,
    pub write_ops: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub verify_failures: u64,
    pub latency_p50_us: u64,
    pub latency_p90_us: u64,
    pub latency_p99_us: u64,
    pub latency_max_us: u64,
}

impl RunReport {
    /// Aggregate per-worker statistics into one report
    pub fn from_workers(stats: &[WorkerStats], elapsed: Duration) -> Self {
        let mut merged = WorkerStats::new(0);
        for s in stats {
            merged.merge(s);
        }
        Self {
            workers: stats.len(),
            elapsed_secs: elapsed.as_secs_f64(),
            read_ops: merged.read_ops,
            write_ops: merged.write_ops,
            read_bytes: merged.read_bytes,
            write_bytes: merged.write_bytes,
            verify_failures: merged.verify_failures,
            latency_p50_us: merged.latency_at_quantile(0.50),
            latency_p90_us: merged.latency_at_quantile(0.90),
            latency_p99_us: merged.latency_at_quantile(0.99),
            latency_max_us: merged.max_latency_us(),
        }
    }

    pub fn total_ops(&self) -> u64 {
        self.read_ops + self.write_ops
    }

    pub fn total_bytes(&self) -> u64 {
        self.read_bytes + self.write_bytes
    }

    /// Aggregate throughput in operations per second
    pub fn ops_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.total_ops() as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }

    /// Aggregate throughput in mebibytes per second
    pub fn mib_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.total_bytes() as f64 / (1024.0 * 1024.0) / self.elapsed_secs
        } else {
            0.0
        }
    }
}
