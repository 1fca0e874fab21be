//! Zero-fill policy
//!
//! The only difference between buffer variants is when zero-initialization
//! happens and how large each zero write is. Both are captured here and
//! handed to the single engine constructor.

use stratabuf_core::{LAZY_FILL_CHUNK, MEMORY_FILL_CHUNK};
use stratabuf_storage::StoreKind;

/// When the engine zero-fills the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStrategy {
    /// Zero the whole capacity at construction
    Eager,
    /// Zero gaps only when a read or write reaches them
    Lazy,
}

/// Zero-fill strategy plus the largest single zero write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillPolicy {
    /// Eager or lazy initialization
    pub strategy: FillStrategy,
    /// Maximum zero bytes per underlying write (at least 1)
    pub chunk_size: usize,
}

impl Default for FillPolicy {
    fn default() -> Self {
        FillPolicy::incremental()
    }
}

impl FillPolicy {
    /// Eager fill with the given chunk size.
    pub const fn eager(chunk_size: usize) -> Self {
        FillPolicy {
            strategy: FillStrategy::Eager,
            chunk_size,
        }
    }

    /// Lazy fill with the given chunk size.
    pub const fn lazy(chunk_size: usize) -> Self {
        FillPolicy {
            strategy: FillStrategy::Lazy,
            chunk_size,
        }
    }

    /// Memory-resident policy: eager, 1MB chunks.
    pub const fn memory() -> Self {
        FillPolicy::eager(MEMORY_FILL_CHUNK)
    }

    /// Incremental policy: lazy, 8KB chunks.
    pub const fn incremental() -> Self {
        FillPolicy::lazy(LAZY_FILL_CHUNK)
    }

    /// Default policy for a store provider.
    pub fn for_store(kind: &StoreKind) -> Self {
        if kind.is_memory_resident() {
            FillPolicy::memory()
        } else {
            FillPolicy::incremental()
        }
    }

    /// Set chunk size (builder pattern).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set strategy (builder pattern).
    pub fn with_strategy(mut self, strategy: FillStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Whether the full capacity is zeroed at construction.
    pub fn is_eager(&self) -> bool {
        self.strategy == FillStrategy::Eager
    }

    /// Chunk size with zero bumped to one.
    pub(crate) fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}
