//! Error types for random-access buffers
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Only [`BufferError::OutOfRange`] is recoverable. Once a buffer reports
//! `FatalWrite` or `FatalRead` its backing store is considered unusable and
//! the buffer should be released.

use std::io;
use thiserror::Error;

/// Result type alias for buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Error types for random-access buffers
#[derive(Debug, Error)]
pub enum BufferError {
    /// Position outside `[0, size]`
    #[error("Position {position} out of range [0, {size}]")]
    OutOfRange {
        /// Requested position
        position: u64,
        /// Buffer capacity
        size: u64,
    },

    /// Write path failed; the buffer is permanently broken
    #[error("Fatal write: {0}")]
    FatalWrite(#[source] FatalCause),

    /// Read path failed; the buffer is permanently broken
    #[error("Fatal read: {0}")]
    FatalRead(#[source] FatalCause),

    /// The backing store could not be opened
    #[error("Failed to open backing store: {0}")]
    StoreOpen(#[source] io::Error),

    /// Buffer configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BufferError {
    /// Whether the buffer must be treated as unusable after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BufferError::FatalWrite(_) | BufferError::FatalRead(_))
    }

    /// Shorthand for a write on a released buffer.
    pub fn released_write() -> Self {
        BufferError::FatalWrite(FatalCause::Released)
    }

    /// Shorthand for a read on a released buffer.
    pub fn released_read() -> Self {
        BufferError::FatalRead(FatalCause::Released)
    }
}

/// Why a read or write path failed.
#[derive(Debug, Error)]
pub enum FatalCause {
    /// The backing store has already been released
    #[error("buffer has been released")]
    Released,

    /// The store accepted or returned fewer bytes than requested
    #[error("short transfer: expected {expected} bytes, got {actual}")]
    ShortTransfer {
        /// Bytes requested
        expected: usize,
        /// Bytes actually transferred
        actual: usize,
    },

    /// Underlying I/O error from the store
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
