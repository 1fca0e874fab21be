//! StrataBuf - Fixed-capacity random-access byte buffers
//!
//! A buffer has an immutable size, a cursor, and clamped reads and writes.
//! Bytes never written read back as zero, but zero-initialization is
//! deferred until a read or write actually reaches a region.
//!
//! # Quick Start
//!
//! ```
//! use stratabuf::{RandomAccessBuffer, ResourceBuffer};
//!
//! // Spill-capable buffer: 1MB, at most 64KB kept in memory
//! let mut buffer = ResourceBuffer::spooled(1024 * 1024, 64 * 1024);
//!
//! buffer.set_position(500_000)?;
//! buffer.write(b"hello", 5)?;
//!
//! buffer.set_position(499_998)?;
//! assert_eq!(buffer.read(7)?, b"\0\0hello");
//!
//! buffer.release();
//! # Ok::<(), stratabuf::BufferError>(())
//! ```
//!
//! # Architecture
//!
//! - `stratabuf-core`: error types and the `RandomAccessBuffer` contract
//! - `stratabuf-storage`: backing stores (memory, spooled, temp file)
//! - `stratabuf-engine`: the lazily zero-filled buffer engine and its config
//!
//! Only the public API is re-exported here.

pub use stratabuf_engine::{
    BufferConfig, BufferConfigError, BufferError, FatalCause, FillPolicy, FillStrategy,
    RandomAccessBuffer, ResourceBuffer, Result,
};
pub use stratabuf_storage::{BackingStore, StoreKind};

/// Default sizes used by the stock buffer variants.
pub mod limits {
    pub use stratabuf_core::limits::*;
}

/// Store instrumentation and fault injection for tests.
pub mod testing {
    pub use stratabuf_storage::testing::*;
}
