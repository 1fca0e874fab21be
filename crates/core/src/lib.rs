//! Core types and traits for StrataBuf
//!
//! This crate defines the foundational types used throughout the system:
//! - BufferError / FatalCause: Error type hierarchy
//! - RandomAccessBuffer: The buffer contract (size, cursor, clamped read/write, release)
//! - Limits: Default zero-fill chunk sizes and spill thresholds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod traits;

pub use error::{BufferError, FatalCause, Result};
pub use limits::{DEFAULT_SPOOL_THRESHOLD, KIB, LAZY_FILL_CHUNK, MEMORY_FILL_CHUNK, MIB};
pub use traits::RandomAccessBuffer;
