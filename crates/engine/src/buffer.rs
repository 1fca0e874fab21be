//! Random-access buffer engine
//!
//! `ResourceBuffer` wraps one backing store and turns it into a
//! fixed-capacity buffer with a cursor and clamped reads and writes.
//!
//! ## Frontier
//!
//! The engine tracks a *frontier*: every byte in `[0, frontier)` has been
//! either zero-filled or written. Stores are not assumed to return zeros for
//! bytes they never saw, so before a write starts past the frontier, or a
//! read ends past it, the gap is zero-filled. The frontier never moves
//! backwards and never passes `size`.
//!
//! ## Zero-fill
//!
//! Zero-fill writes at most `fill_chunk_size` bytes per store call and
//! allocates a single zero chunk per pass, so filling a large gap costs one
//! chunk of memory, not the whole gap.
//!
//! ## Release
//!
//! `release` closes and drops the store. It is idempotent, and every later
//! read or write fails before any bounds are computed.

use std::fmt;
use std::io;

use stratabuf_core::{BufferError, FatalCause, RandomAccessBuffer, Result};
use stratabuf_storage::BackingStore;
use tracing::{debug, trace, warn};

use crate::policy::{FillPolicy, FillStrategy};

/// Fixed-capacity buffer over an exclusively owned backing store
pub struct ResourceBuffer {
    /// Backing store (None once released)
    store: Option<Box<dyn BackingStore>>,

    /// Logical capacity in bytes
    size: u64,

    /// Read/write cursor in `[0, size]`
    position: u64,

    /// Bytes `[0, frontier)` are zero-filled or written
    frontier: u64,

    /// Maximum zero bytes per store write
    fill_chunk_size: usize,
}

impl ResourceBuffer {
    /// Wrap an already-open store with the incremental (lazy, 8KB) policy.
    ///
    /// Lazy construction performs no I/O and cannot fail.
    pub fn new(size: u64, store: Box<dyn BackingStore>) -> Self {
        Self::unfilled(size, store, FillPolicy::incremental())
    }

    /// Wrap an already-open store with an explicit fill policy.
    ///
    /// An eager policy zero-fills the whole capacity before returning.
    ///
    /// # Errors
    ///
    /// Returns `FatalWrite` if the eager fill fails.
    pub fn with_policy(
        size: u64,
        store: Box<dyn BackingStore>,
        policy: FillPolicy,
    ) -> Result<Self> {
        let mut buffer = Self::unfilled(size, store, policy);
        if policy.strategy == FillStrategy::Eager {
            buffer.fill_to(size)?;
        }
        Ok(buffer)
    }

    /// Buffer with an empty frontier; no store I/O.
    fn unfilled(size: u64, store: Box<dyn BackingStore>, policy: FillPolicy) -> Self {
        let fill_chunk_size = policy.effective_chunk_size();
        debug!(
            size,
            strategy = ?policy.strategy,
            chunk_size = fill_chunk_size,
            "Created buffer"
        );
        ResourceBuffer {
            store: Some(store),
            size,
            position: 0,
            frontier: 0,
            fill_chunk_size,
        }
    }

    /// Offset up to which the store holds deterministic bytes.
    pub fn frontier(&self) -> u64 {
        self.frontier
    }

    /// Largest zero write issued during a fill pass.
    pub fn fill_chunk_size(&self) -> usize {
        self.fill_chunk_size
    }

    /// Zero-fill `[frontier, target)` and advance the frontier to `target`.
    ///
    /// No-op if `target <= frontier`.
    fn fill_to(&mut self, target: u64) -> Result<()> {
        let store = self.store.as_mut().ok_or_else(BufferError::released_write)?;
        if target <= self.frontier {
            return Ok(());
        }

        let gap = target - self.frontier;
        let chunk_len = clamp_len(self.fill_chunk_size, gap);
        let zeros = vec![0u8; chunk_len];

        store.seek_to(self.frontier).map_err(write_failed)?;
        let mut left = gap;
        let mut chunks = 0u64;
        while left > 0 {
            let n = clamp_len(chunk_len, left);
            let written = store.write_bytes(&zeros[..n]).map_err(write_failed)?;
            if written != n {
                return Err(short_write(n, written));
            }
            left -= n as u64;
            chunks += 1;
        }

        trace!(from = self.frontier, to = target, chunks, "Zero-filled gap");
        self.frontier = target;
        Ok(())
    }
}

impl RandomAccessBuffer for ResourceBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_position(&mut self, position: u64) -> Result<()> {
        // position == size is allowed: the buffer is full
        if position > self.size {
            return Err(BufferError::OutOfRange {
                position,
                size: self.size,
            });
        }
        self.position = position;
        Ok(())
    }

    fn write(&mut self, data: &[u8], length: usize) -> Result<usize> {
        if self.store.is_none() {
            return Err(BufferError::released_write());
        }
        let writable = clamp_len(length.min(data.len()), self.size - self.position);
        if writable == 0 {
            return Ok(0);
        }
        if writable < length {
            trace!(position = self.position, length, writable, "Clamped write");
        }

        if self.position > self.frontier {
            self.fill_to(self.position)?;
        }

        let store = self.store.as_mut().ok_or_else(BufferError::released_write)?;
        store.seek_to(self.position).map_err(write_failed)?;
        let written = store
            .write_bytes(&data[..writable])
            .map_err(write_failed)?;
        if written != writable {
            return Err(short_write(writable, written));
        }

        self.position += writable as u64;
        self.frontier = self.frontier.max(self.position);
        Ok(writable)
    }

    fn read(&mut self, length: usize) -> Result<Vec<u8>> {
        if self.store.is_none() {
            return Err(BufferError::released_read());
        }
        let readable = clamp_len(length, self.size - self.position);
        if readable == 0 {
            return Ok(Vec::new());
        }
        if readable < length {
            trace!(position = self.position, length, readable, "Clamped read");
        }

        let end = self.position + readable as u64;
        if end > self.frontier {
            self.fill_to(end)?;
        }

        let store = self.store.as_mut().ok_or_else(BufferError::released_read)?;
        store.seek_to(self.position).map_err(read_failed)?;
        let bytes = store.read_bytes(readable).map_err(read_failed)?;
        if bytes.len() != readable {
            warn!(expected = readable, actual = bytes.len(), "Short read from backing store");
            return Err(BufferError::FatalRead(FatalCause::ShortTransfer {
                expected: readable,
                actual: bytes.len(),
            }));
        }

        self.position = end;
        Ok(bytes)
    }

    fn release(&mut self) {
        let Some(mut store) = self.store.take() else {
            return;
        };
        if let Err(e) = store.close() {
            warn!(error = %e, "Failed to close backing store on release");
        }
        debug!(size = self.size, frontier = self.frontier, "Released buffer");
    }

    fn is_released(&self) -> bool {
        self.store.is_none()
    }
}

impl fmt::Debug for ResourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBuffer")
            .field("size", &self.size)
            .field("position", &self.position)
            .field("frontier", &self.frontier)
            .field("fill_chunk_size", &self.fill_chunk_size)
            .field("released", &self.store.is_none())
            .finish()
    }
}

/// `min(len, limit)` without truncating `limit` on narrow targets.
fn clamp_len(len: usize, limit: u64) -> usize {
    usize::try_from(limit).map_or(len, |limit| len.min(limit))
}

fn write_failed(e: io::Error) -> BufferError {
    warn!(error = %e, "Backing store write failed");
    BufferError::FatalWrite(FatalCause::Io(e))
}

fn read_failed(e: io::Error) -> BufferError {
    warn!(error = %e, "Backing store read failed");
    BufferError::FatalRead(FatalCause::Io(e))
}

fn short_write(expected: usize, actual: usize) -> BufferError {
    warn!(expected, actual, "Short write to backing store");
    BufferError::FatalWrite(FatalCause::ShortTransfer { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratabuf_storage::testing::{FaultPlan, InstrumentedStore, StatsHandle};

    fn instrumented(size: u64, policy: FillPolicy) -> (ResourceBuffer, StatsHandle) {
        instrumented_with_faults(size, policy, FaultPlan::new())
    }

    fn instrumented_with_faults(
        size: u64,
        policy: FillPolicy,
        faults: FaultPlan,
    ) -> (ResourceBuffer, StatsHandle) {
        let store = InstrumentedStore::with_faults(faults);
        let handle = store.handle();
        let buffer = ResourceBuffer::with_policy(size, Box::new(store), policy).unwrap();
        (buffer, handle)
    }

    #[test]
    fn test_new_buffer() {
        let buffer = ResourceBuffer::new(1024, Box::new(InstrumentedStore::new()));
        assert_eq!(buffer.size(), 1024);
        assert_eq!(buffer.position(), 0);
        assert_eq!(buffer.frontier(), 0);
        assert_eq!(buffer.fill_chunk_size(), 8 * 1024);
        assert!(!buffer.is_released());
    }

    #[test]
    fn test_new_matches_incremental_policy() {
        let plain = ResourceBuffer::new(512, Box::new(InstrumentedStore::new()));
        let explicit = ResourceBuffer::with_policy(
            512,
            Box::new(InstrumentedStore::new()),
            FillPolicy::incremental(),
        )
        .unwrap();
        assert_eq!(plain.fill_chunk_size(), explicit.fill_chunk_size());
        assert_eq!(plain.frontier(), explicit.frontier());
        assert_eq!(plain.remaining(), explicit.remaining());
    }

    #[test]
    fn test_lazy_construction_does_no_io() {
        let (_buffer, handle) = instrumented(4096, FillPolicy::lazy(16));
        assert_eq!(handle.stats().total_calls(), 0);
    }

    #[test]
    fn test_eager_construction_fills_capacity() {
        let (buffer, handle) = instrumented(1000, FillPolicy::eager(64));
        assert_eq!(buffer.frontier(), 1000);

        let stats = handle.stats();
        assert_eq!(stats.bytes_written, 1000);
        assert_eq!(stats.seeks, 1);
        // 15 full chunks and a 40 byte tail
        assert_eq!(stats.write_calls, 16);
        assert!(stats.largest_write <= 64);
        assert_eq!(handle.contents(), vec![0u8; 1000]);
    }

    #[test]
    fn test_eager_read_never_fills() {
        let (mut buffer, handle) = instrumented(256, FillPolicy::eager(32));
        handle.reset();
        assert_eq!(buffer.read(256).unwrap(), vec![0u8; 256]);
        assert_eq!(handle.stats().bytes_written, 0);
    }

    #[test]
    fn test_set_position_bounds() {
        let (mut buffer, handle) = instrumented(100, FillPolicy::lazy(8));

        buffer.set_position(100).unwrap();
        assert_eq!(buffer.position(), 100);
        buffer.set_position(0).unwrap();
        assert_eq!(buffer.position(), 0);

        buffer.set_position(42).unwrap();
        let err = buffer.set_position(101).unwrap_err();
        assert!(matches!(
            err,
            BufferError::OutOfRange {
                position: 101,
                size: 100
            }
        ));
        assert_eq!(buffer.position(), 42);

        assert_eq!(handle.stats().total_calls(), 0);
    }

    #[test]
    fn test_gap_write_fills_from_frontier() {
        let (mut buffer, handle) = instrumented(1024, FillPolicy::lazy(100));
        buffer.set_position(500).unwrap();
        assert_eq!(buffer.write(b"xyz", 3).unwrap(), 3);

        assert_eq!(buffer.position(), 503);
        assert_eq!(buffer.frontier(), 503);

        let stats = handle.stats();
        assert_eq!(stats.bytes_written, 503);
        assert!(stats.largest_write <= 100);

        let contents = handle.contents();
        assert_eq!(&contents[..500], &[0u8; 500][..]);
        assert_eq!(&contents[500..503], b"xyz");
    }

    #[test]
    fn test_write_inside_frontier_skips_fill() {
        let (mut buffer, handle) = instrumented(64, FillPolicy::lazy(8));
        buffer.write(&[1u8; 32], 32).unwrap();
        handle.reset();

        buffer.set_position(8).unwrap();
        buffer.write(&[2u8; 4], 4).unwrap();
        let stats = handle.stats();
        assert_eq!(stats.write_calls, 1);
        assert_eq!(stats.bytes_written, 4);
        assert_eq!(buffer.frontier(), 32);
    }

    #[test]
    fn test_read_straddling_frontier_fills_tail_only() {
        let (mut buffer, handle) = instrumented(128, FillPolicy::lazy(16));
        buffer.write(&[9u8; 10], 10).unwrap();
        handle.reset();

        buffer.set_position(5).unwrap();
        let bytes = buffer.read(20).unwrap();
        assert_eq!(&bytes[..5], &[9u8; 5]);
        assert_eq!(&bytes[5..], &[0u8; 15]);

        assert_eq!(handle.stats().bytes_written, 15);
        assert_eq!(buffer.frontier(), 25);
        assert_eq!(buffer.position(), 25);
    }

    #[test]
    fn test_fill_allocates_one_chunk_per_pass() {
        let (mut buffer, handle) = instrumented(10_000, FillPolicy::lazy(7));
        assert_eq!(buffer.read(10_000).unwrap().len(), 10_000);
        let stats = handle.stats();
        assert_eq!(stats.largest_write, 7);
        assert_eq!(stats.write_calls, 10_000u64.div_ceil(7));
    }

    #[test]
    fn test_frontier_is_monotonic() {
        let (mut buffer, _handle) = instrumented(512, FillPolicy::lazy(32));
        buffer.set_position(300).unwrap();
        buffer.write(b"a", 1).unwrap();
        assert_eq!(buffer.frontier(), 301);

        buffer.set_position(10).unwrap();
        buffer.write(b"b", 1).unwrap();
        assert_eq!(buffer.frontier(), 301);

        buffer.set_position(0).unwrap();
        buffer.read(5).unwrap();
        assert_eq!(buffer.frontier(), 301);
    }

    #[test]
    fn test_write_clamps_to_data_len() {
        let (mut buffer, _handle) = instrumented(64, FillPolicy::lazy(8));
        assert_eq!(buffer.write(b"abc", 10).unwrap(), 3);
        assert_eq!(buffer.position(), 3);
    }

    #[test]
    fn test_write_and_read_at_end() {
        let (mut buffer, handle) = instrumented(16, FillPolicy::lazy(8));
        buffer.set_position(16).unwrap();
        assert_eq!(buffer.write(b"abc", 3).unwrap(), 0);
        assert!(buffer.read(3).unwrap().is_empty());
        assert_eq!(buffer.write(b"", 0).unwrap(), 0);
        assert_eq!(handle.stats().total_calls(), 0);
    }

    #[test]
    fn test_zero_size_buffer() {
        let (mut buffer, handle) = instrumented(0, FillPolicy::eager(8));
        assert_eq!(buffer.frontier(), 0);
        assert_eq!(buffer.write(b"abc", 3).unwrap(), 0);
        assert!(buffer.read(10).unwrap().is_empty());
        assert!(buffer.set_position(1).is_err());
        assert_eq!(handle.stats().write_calls, 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut buffer, handle) = instrumented(64, FillPolicy::lazy(8));
        buffer.release();
        assert!(buffer.is_released());
        assert!(handle.stats().closed);

        buffer.release();
        assert!(buffer.is_released());
    }

    #[test]
    fn test_released_buffer_rejects_io() {
        let (mut buffer, _handle) = instrumented(64, FillPolicy::lazy(8));
        buffer.release();

        assert!(matches!(
            buffer.write(b"yay", 3),
            Err(BufferError::FatalWrite(FatalCause::Released))
        ));
        assert!(matches!(
            buffer.read(3),
            Err(BufferError::FatalRead(FatalCause::Released))
        ));
    }

    #[test]
    fn test_released_check_precedes_bounds() {
        let (mut buffer, _handle) = instrumented(64, FillPolicy::lazy(8));
        buffer.set_position(64).unwrap();
        buffer.release();

        // At end of buffer a live buffer would clamp to zero; a released one fails
        assert!(buffer.write(b"x", 1).is_err());
        assert!(buffer.read(1).is_err());
    }

    #[test]
    fn test_release_survives_close_failure() {
        let (mut buffer, handle) =
            instrumented_with_faults(64, FillPolicy::lazy(8), FaultPlan::new().fail_close());
        buffer.release();
        assert!(buffer.is_released());
        assert!(handle.stats().closed);
    }

    #[test]
    fn test_short_write_is_fatal() {
        let (mut buffer, _handle) = instrumented_with_faults(
            64,
            FillPolicy::lazy(8),
            FaultPlan::new().fail_writes_after(2),
        );
        let err = buffer.write(b"abcd", 4).unwrap_err();
        assert!(matches!(
            err,
            BufferError::FatalWrite(FatalCause::ShortTransfer {
                expected: 4,
                actual: 2
            })
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_short_fill_is_fatal_write() {
        let (mut buffer, _handle) = instrumented_with_faults(
            1024,
            FillPolicy::lazy(64),
            FaultPlan::new().fail_writes_after(100),
        );
        buffer.set_position(500).unwrap();
        let err = buffer.write(b"x", 1).unwrap_err();
        assert!(matches!(
            err,
            BufferError::FatalWrite(FatalCause::ShortTransfer {
                expected: 64,
                actual: 36
            })
        ));
        assert_eq!(buffer.frontier(), 0);
    }

    #[test]
    fn test_eager_fill_failure_fails_construction() {
        let store = InstrumentedStore::with_faults(FaultPlan::new().fail_writes_after(10));
        let result = ResourceBuffer::with_policy(100, Box::new(store), FillPolicy::eager(32));
        assert!(matches!(result, Err(BufferError::FatalWrite(_))));
    }

    #[test]
    fn test_short_read_is_fatal() {
        let (mut buffer, handle) = instrumented(64, FillPolicy::lazy(8));
        buffer.write(&[5u8; 64], 64).unwrap();
        handle.set_faults(FaultPlan::new().truncate_reads_after(10));

        buffer.set_position(0).unwrap();
        let err = buffer.read(64).unwrap_err();
        assert!(matches!(
            err,
            BufferError::FatalRead(FatalCause::ShortTransfer {
                expected: 64,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_read_io_error_is_fatal_read() {
        let (mut buffer, handle) = instrumented(64, FillPolicy::eager(64));
        handle.set_faults(FaultPlan::new().fail_reads());
        assert!(matches!(
            buffer.read(8),
            Err(BufferError::FatalRead(FatalCause::Io(_)))
        ));
    }

    #[test]
    fn test_seek_error_maps_to_path() {
        let (mut buffer, handle) = instrumented(64, FillPolicy::eager(64));
        handle.set_faults(FaultPlan::new().fail_seeks());
        assert!(matches!(
            buffer.write(b"a", 1),
            Err(BufferError::FatalWrite(FatalCause::Io(_)))
        ));
        assert!(matches!(
            buffer.read(1),
            Err(BufferError::FatalRead(FatalCause::Io(_)))
        ));
    }

    #[test]
    fn test_debug_output() {
        let (buffer, _handle) = instrumented(32, FillPolicy::lazy(8));
        let text = format!("{:?}", buffer);
        assert!(text.contains("size: 32"));
        assert!(text.contains("released: false"));
    }

    #[test]
    fn test_clamp_len() {
        assert_eq!(clamp_len(10, 4), 4);
        assert_eq!(clamp_len(4, 10), 4);
        assert_eq!(clamp_len(7, u64::MAX), 7);
    }
}
