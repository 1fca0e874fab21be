//! Concrete backing store providers
//!
//! Three providers are available:
//!
//! - **Memory**: a growable in-memory cursor, preallocated to the size hint
//! - **Spooled**: kept in memory up to a threshold, then spilled to an
//!   anonymous temporary file (`tempfile::SpooledTempFile`)
//! - **TempFile**: an anonymous temporary file on disk from the start
//!
//! None of them survive the process; temporary files are removed by the OS
//! once their handle is dropped.

use std::io::{self, Cursor};

use serde::{Deserialize, Serialize};
use stratabuf_core::DEFAULT_SPOOL_THRESHOLD;
use tempfile::SpooledTempFile;
use tracing::debug;

use crate::store::BackingStore;

/// Which provider backs a buffer.
///
/// Deserializes from a tagged table, e.g. `{ kind = "spooled", max_memory = 4096 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreKind {
    /// Memory-resident store
    Memory,
    /// Memory up to `max_memory` bytes, then disk
    Spooled {
        /// Bytes to keep in memory before spilling (default: 2MB)
        #[serde(default = "default_max_memory")]
        max_memory: u64,
    },
    /// Disk-only anonymous temporary file
    TempFile,
}

fn default_max_memory() -> u64 {
    DEFAULT_SPOOL_THRESHOLD
}

impl Default for StoreKind {
    fn default() -> Self {
        StoreKind::spooled()
    }
}

impl StoreKind {
    /// Spooled store with the default 2MB threshold.
    pub fn spooled() -> Self {
        StoreKind::Spooled {
            max_memory: DEFAULT_SPOOL_THRESHOLD,
        }
    }

    /// True for stores that never touch disk.
    ///
    /// Such stores gain nothing from lazy zero-fill.
    pub fn is_memory_resident(&self) -> bool {
        matches!(self, StoreKind::Memory)
    }

    /// Short provider name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            StoreKind::Memory => "memory",
            StoreKind::Spooled { .. } => "spooled",
            StoreKind::TempFile => "temp_file",
        }
    }

    /// Open a fresh store sized for a buffer of `size_hint` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size hint does not fit in memory addressing
    /// (memory stores) or the temporary file cannot be created.
    pub fn open(&self, size_hint: u64) -> io::Result<Box<dyn BackingStore>> {
        debug!(kind = self.name(), size_hint, "Opening backing store");
        match *self {
            StoreKind::Memory => Ok(Box::new(open_memory(size_hint)?)),
            StoreKind::Spooled { max_memory } => Ok(Box::new(open_spooled(size_hint, max_memory))),
            StoreKind::TempFile => Ok(Box::new(tempfile::tempfile()?)),
        }
    }
}

/// Open an in-memory store with room for `size_hint` bytes.
///
/// # Errors
///
/// Returns `InvalidInput` if `size_hint` exceeds the address space, or
/// `OutOfMemory` if the reservation cannot be made.
pub fn open_memory(size_hint: u64) -> io::Result<Cursor<Vec<u8>>> {
    let capacity = usize::try_from(size_hint).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("memory store of {} bytes exceeds address space", size_hint),
        )
    })?;
    let mut data = Vec::new();
    data.try_reserve_exact(capacity).map_err(|e| {
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!("cannot reserve {} bytes for memory store: {}", size_hint, e),
        )
    })?;
    Ok(Cursor::new(data))
}

/// Open a spooled store that spills to disk above the effective threshold.
pub fn open_spooled(size_hint: u64, max_memory: u64) -> SpooledTempFile {
    SpooledTempFile::new(effective_threshold(size_hint, max_memory))
}

/// Memory threshold actually used for a spooled store: `min(max_memory, size_hint)`.
///
/// A buffer never holds more than its size, so a larger threshold only
/// wastes reservation headroom.
pub fn effective_threshold(size_hint: u64, max_memory: u64) -> usize {
    usize::try_from(max_memory.min(size_hint)).unwrap_or(usize::MAX)
}
