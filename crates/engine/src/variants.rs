//! Buffer variants
//!
//! Thin constructors pairing a store provider with its fill policy:
//!
//! | Variant | Store | Policy |
//! |---------|-------|--------|
//! | `in_memory` | memory cursor | eager, 1MB chunks |
//! | `spooled` | memory up to threshold, then disk | lazy, 8KB chunks |
//! | `temp_file` | anonymous temp file | lazy, 8KB chunks |

use stratabuf_core::{BufferError, Result, DEFAULT_SPOOL_THRESHOLD};
use stratabuf_storage::{open_memory, open_spooled, StoreKind};

use crate::buffer::ResourceBuffer;
use crate::policy::FillPolicy;

impl ResourceBuffer {
    /// Memory-resident buffer, zeroed up front.
    ///
    /// After construction the frontier equals `size`, so reads never
    /// trigger a lazy fill.
    ///
    /// # Errors
    ///
    /// Returns `StoreOpen` if `size` exceeds the address space, or
    /// `FatalWrite` if the eager fill fails.
    pub fn in_memory(size: u64) -> Result<Self> {
        let store = open_memory(size).map_err(BufferError::StoreOpen)?;
        Self::with_policy(size, Box::new(store), FillPolicy::memory())
    }

    /// Spill-capable buffer keeping up to `max_memory` bytes in memory.
    ///
    /// The threshold is clamped to `size`. Nothing is zeroed up front.
    pub fn spooled(size: u64, max_memory: u64) -> Self {
        let store = open_spooled(size, max_memory);
        Self::new(size, Box::new(store))
    }

    /// Spill-capable buffer with the default 2MB memory threshold.
    pub fn spooled_with_default_threshold(size: u64) -> Self {
        Self::spooled(size, DEFAULT_SPOOL_THRESHOLD)
    }

    /// Disk-backed buffer over an anonymous temporary file.
    ///
    /// # Errors
    ///
    /// Returns `StoreOpen` if the temporary file cannot be created.
    pub fn temp_file(size: u64) -> Result<Self> {
        Self::open(size, StoreKind::TempFile)
    }

    /// Buffer over a fresh store of `kind` with that store's default policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreOpen` if the store cannot be opened, or `FatalWrite`
    /// if an eager fill fails.
    pub fn open(size: u64, kind: StoreKind) -> Result<Self> {
        Self::open_with_policy(size, kind, FillPolicy::for_store(&kind))
    }

    /// Buffer over a fresh store of `kind` with an explicit policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreOpen` if the store cannot be opened, or `FatalWrite`
    /// if an eager fill fails.
    pub fn open_with_policy(size: u64, kind: StoreKind, policy: FillPolicy) -> Result<Self> {
        let store = kind.open(size).map_err(BufferError::StoreOpen)?;
        Self::with_policy(size, store, policy)
    }
}
