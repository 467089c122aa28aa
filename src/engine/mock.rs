//! Mock storage engine for testing
//!
//! An in-memory implementation of the [`ArrayEngine`] trait. It stores
//! written buffers keyed by their rectangle, can be flipped into a failing
//! mode, and tracks operation counts, making driver tests fast and
//! deterministic.
//!
//! The store is behind `Arc<Mutex<..>>` so a test can keep a clone of the
//! engine for inspection after handing one instance to a worker.

use super::ArrayEngine;
use crate::error::{Result, TileBenchError};
use crate::layout::CELL_BYTES;
use crate::tiler::Rectangle;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory engine keyed by request rectangle
#[derive(Clone, Debug)]
pub struct MockEngine {
    store: Arc<Mutex<HashMap<Rectangle, Vec<i32>>>>,
    should_fail: Arc<Mutex<bool>>,
    write_count: Arc<Mutex<u64>>,
    read_count: Arc<Mutex<u64>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
            should_fail: Arc::new(Mutex::new(false)),
            write_count: Arc::new(Mutex::new(0)),
            read_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Make every subsequent operation fail with an IO error
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    /// Number of successful writes observed
    pub fn write_count(&self) -> u64 {
        *self.write_count.lock().unwrap()
    }

    /// Number of successful reads observed
    pub fn read_count(&self) -> u64 {
        *self.read_count.lock().unwrap()
    }

    /// Number of rectangles currently stored
    pub fn stored_count(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<()> {
        if *self.should_fail.lock().unwrap() {
            return Err(TileBenchError::Io(io::Error::new(
                io::ErrorKind::Other,
                "mock engine failure",
            )));
        }
        Ok(())
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayEngine for MockEngine {
    fn write(&mut self, rect: &Rectangle, values: &[i32]) -> Result<()> {
        self.check_failure()?;
        if values.len() != rect.cell_count() as usize {
            return Err(TileBenchError::ShortChunk {
                expected: rect.cell_count() as usize * CELL_BYTES,
                actual: values.len() * CELL_BYTES,
            });
        }
        self.store.lock().unwrap().insert(*rect, values.to_vec());
        *self.write_count.lock().unwrap() += 1;
        Ok(())
    }

    fn read(&mut self, rect: &Rectangle) -> Result<Vec<i32>> {
        self.check_failure()?;
        let values = self
            .store
            .lock()
            .unwrap()
            .get(rect)
            .cloned()
            .ok_or_else(|| {
                TileBenchError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no data stored for rectangle {}", rect),
                ))
            })?;
        *self.read_count.lock().unwrap() += 1;
        Ok(values)
    }
}
