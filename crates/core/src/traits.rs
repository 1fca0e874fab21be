//! Core trait for random-access buffers
//!
//! This module defines the `RandomAccessBuffer` contract that every buffer
//! implementation honours, so callers can swap memory-resident and
//! disk-spillable buffers without changing upper layers.

use crate::error::Result;

/// Fixed-capacity, randomly addressable byte buffer
///
/// A buffer has an immutable `size` and a cursor in `[0, size]`. Bytes that
/// were never written read back as zero.
///
/// Reads and writes that would cross the end of the buffer are clamped: they
/// transfer as many bytes as fit and report the shortened count. Reaching
/// the end is never an error.
///
/// Implementations are single-threaded; every mutating call takes
/// `&mut self`.
pub trait RandomAccessBuffer {
    /// Logical capacity in bytes. Constant for the buffer's lifetime.
    fn size(&self) -> u64;

    /// Current read/write cursor.
    fn position(&self) -> u64;

    /// Move the cursor.
    ///
    /// `position == size` is allowed and means "nothing left".
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `position > size`. The cursor is unchanged.
    fn set_position(&mut self, position: u64) -> Result<()>;

    /// Write up to `length` bytes from `data` at the cursor.
    ///
    /// Returns the number of bytes written, which is
    /// `min(length, data.len(), size - position)`.
    ///
    /// # Errors
    ///
    /// Returns `FatalWrite` if the buffer was released or the store fails.
    fn write(&mut self, data: &[u8], length: usize) -> Result<usize>;

    /// Read up to `length` bytes at the cursor.
    ///
    /// The returned vector holds `min(length, size - position)` bytes.
    ///
    /// # Errors
    ///
    /// Returns `FatalRead` if the buffer was released or the store fails.
    /// A zero-fill needed before the read may fail with `FatalWrite`.
    fn read(&mut self, length: usize) -> Result<Vec<u8>>;

    /// Release the backing store. Idempotent.
    fn release(&mut self);

    /// Whether `release` has been called.
    fn is_released(&self) -> bool;

    /// Bytes between the cursor and the end of the buffer.
    fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.position())
    }
}
