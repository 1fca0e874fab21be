//! Backing store trait definition.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// A seekable, byte-addressable resource that buffers are built on.
///
/// Backing stores are **opaque byte stores**. They provide positioning,
/// reading and writing of raw bytes and nothing else. The buffer engine owns
/// all interpretation: capacity, clamping and zero-initialization.
///
/// # Short transfers
///
/// `write_bytes` and `read_bytes` report how much was actually transferred
/// instead of failing on a short count. The engine decides whether a short
/// transfer is fatal.
///
/// # Implementors
///
/// Every `Read + Write + Seek + Send` type is a backing store, so an
/// in-memory cursor, a spooled temporary file, or a plain `File` can be
/// handed to a buffer directly.
pub trait BackingStore: Send {
    /// Position the store at `offset` bytes from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be positioned there.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Write `data` at the current position.
    ///
    /// Keeps writing until all of `data` is accepted or the store accepts
    /// nothing more. Returns the number of bytes accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<usize>;

    /// Read up to `count` bytes from the current position.
    ///
    /// The result is shorter than `count` only if the store ran out of data.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>>;

    /// Flush pending writes before the store is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    fn close(&mut self) -> io::Result<()>;
}

impl<T> BackingStore for T
where
    T: Read + Write + Seek + Send,
{
    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        let reached = self.seek(SeekFrom::Start(offset))?;
        if reached != offset {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("seek to {} landed at {}", offset, reached),
            ));
        }
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < data.len() {
            match self.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }

    fn read_bytes(&mut self, count: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(count);
        Read::take(&mut *self, count as u64).read_to_end(&mut out)?;
        Ok(out)
    }

    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}
