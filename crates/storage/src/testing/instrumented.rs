//! Instrumented in-memory store
//!
//! Records every call the engine makes against the store and optionally
//! injects faults. The store and its [`StatsHandle`] share state, so a test
//! keeps the handle after giving the store away to a buffer.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::fault::FaultPlan;

/// Counters accumulated over the lifetime of an instrumented store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Seek calls
    pub seeks: u64,
    /// Underlying `write` calls
    pub write_calls: u64,
    /// Largest single `write` call in bytes
    pub largest_write: usize,
    /// Total bytes accepted
    pub bytes_written: u64,
    /// Underlying `read` calls
    pub read_calls: u64,
    /// Total bytes returned
    pub bytes_read: u64,
    /// Whether `flush` ran (the store's close)
    pub closed: bool,
}

impl StoreStats {
    /// Number of I/O calls of any kind
    pub fn total_calls(&self) -> u64 {
        self.seeks + self.write_calls + self.read_calls
    }
}

#[derive(Debug, Default)]
struct Shared {
    data: Cursor<Vec<u8>>,
    stats: StoreStats,
    faults: FaultPlan,
}

/// In-memory store that records calls and injects faults
#[derive(Debug, Default)]
pub struct InstrumentedStore {
    shared: Arc<Mutex<Shared>>,
}

/// Observer for an [`InstrumentedStore`] that outlives the move into a buffer
#[derive(Debug, Clone)]
pub struct StatsHandle {
    shared: Arc<Mutex<Shared>>,
}

impl InstrumentedStore {
    /// Fault-free store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that misbehaves according to `faults`
    pub fn with_faults(faults: FaultPlan) -> Self {
        let store = Self::default();
        store.shared.lock().faults = faults;
        store
    }

    /// Handle for observing this store later
    pub fn handle(&self) -> StatsHandle {
        StatsHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl StatsHandle {
    /// Copy of the counters so far
    pub fn stats(&self) -> StoreStats {
        self.shared.lock().stats.clone()
    }

    /// Zero all counters
    pub fn reset(&self) {
        self.shared.lock().stats = StoreStats::default();
    }

    /// Copy of the raw bytes the store holds
    pub fn contents(&self) -> Vec<u8> {
        self.shared.lock().data.get_ref().clone()
    }

    /// Replace the fault plan, e.g. to break a store mid-test
    pub fn set_faults(&self, faults: FaultPlan) {
        self.shared.lock().faults = faults;
    }
}

impl Read for InstrumentedStore {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut shared = self.shared.lock();
        shared.stats.read_calls += 1;
        if shared.faults.fail_reads {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        let allowed = FaultPlan::charge(&mut shared.faults.read_budget, buf.len());
        let n = shared.data.read(&mut buf[..allowed])?;
        shared.stats.bytes_read += n as u64;
        Ok(n)
    }
}

impl Write for InstrumentedStore {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut shared = self.shared.lock();
        shared.stats.write_calls += 1;
        shared.stats.largest_write = shared.stats.largest_write.max(buf.len());
        let allowed = FaultPlan::charge(&mut shared.faults.write_budget, buf.len());
        let n = shared.data.write(&buf[..allowed])?;
        shared.stats.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut shared = self.shared.lock();
        shared.stats.closed = true;
        if shared.faults.fail_close {
            return Err(io::Error::new(io::ErrorKind::Other, "injected close failure"));
        }
        Ok(())
    }
}

impl Seek for InstrumentedStore {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let mut shared = self.shared.lock();
        shared.stats.seeks += 1;
        if shared.faults.fail_seeks {
            return Err(io::Error::new(io::ErrorKind::Other, "injected seek failure"));
        }
        shared.data.seek(pos)
    }
}
