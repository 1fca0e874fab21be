//! Buffer engine for StrataBuf
//!
//! The engine turns a backing store into a fixed-capacity random-access
//! buffer:
//! - ResourceBuffer: cursor, clamped reads and writes, lazy zero-fill
//! - FillPolicy: eager or lazy initialization and the zero chunk size
//! - Variants: memory (eager, 1MB), spooled and temp-file (lazy, 8KB)
//! - BufferConfig: TOML-loadable buffer configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod config;
pub mod policy;
mod variants;

pub use buffer::ResourceBuffer;
pub use config::{BufferConfig, BufferConfigError};
pub use policy::{FillPolicy, FillStrategy};

// Re-export the contract so callers need only this crate
pub use stratabuf_core::{BufferError, FatalCause, RandomAccessBuffer, Result};
