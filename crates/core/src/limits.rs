//! Size constants shared by stores and buffers
//!
//! Defaults for zero-fill chunking and spill thresholds. Buffers may be
//! configured with other values; these are what the stock variants use.

/// One kibibyte.
pub const KIB: usize = 1024;

/// One mebibyte.
pub const MIB: usize = 1024 * 1024;

/// Zero-fill chunk for memory-resident buffers (1MB).
///
/// Memory stores gain nothing from sparse writes, so the whole capacity is
/// zeroed up front with large writes to amortize per-call overhead.
pub const MEMORY_FILL_CHUNK: usize = MIB;

/// Zero-fill chunk for lazily filled buffers (8KB).
pub const LAZY_FILL_CHUNK: usize = 8 * KIB;

/// Bytes a spooled store keeps in memory before spilling to disk (2MB).
pub const DEFAULT_SPOOL_THRESHOLD: u64 = 2 * MIB as u64;
