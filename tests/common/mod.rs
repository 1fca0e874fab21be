//! Shared test utilities for all integration test suites.
//!
//! Import via `mod common;` from any test file.

#![allow(dead_code)]

use std::sync::Once;

pub use stratabuf::{BufferError, FatalCause, RandomAccessBuffer, ResourceBuffer};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Set `RUST_LOG=stratabuf_engine=trace` to see zero-fill passes.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Implementations
// ============================================================================

/// One buffer implementation under test
pub struct Implementation {
    /// Label for assertion messages
    pub name: &'static str,
    /// Fresh buffer
    pub buffer: ResourceBuffer,
    /// Expected capacity
    pub size: u64,
}

/// Every buffer variant at a few sizes.
///
/// Sizes include one that is not a multiple of any chunk size and one
/// larger than the spooled threshold used.
pub fn implementations() -> Vec<Implementation> {
    init_tracing();
    vec![
        Implementation {
            name: "memory/1KB",
            buffer: ResourceBuffer::in_memory(1024).unwrap(),
            size: 1024,
        },
        Implementation {
            name: "memory/1MB",
            buffer: ResourceBuffer::in_memory(1024 * 1024).unwrap(),
            size: 1024 * 1024,
        },
        Implementation {
            name: "spooled/3333",
            buffer: ResourceBuffer::spooled_with_default_threshold(3333),
            size: 3333,
        },
        Implementation {
            name: "spooled/1MB",
            buffer: ResourceBuffer::spooled_with_default_threshold(1024 * 1024),
            size: 1024 * 1024,
        },
        Implementation {
            name: "spooled/1MB-spilled",
            buffer: ResourceBuffer::spooled(1024 * 1024, 4096),
            size: 1024 * 1024,
        },
        Implementation {
            name: "temp_file/5000",
            buffer: ResourceBuffer::temp_file(5000).unwrap(),
            size: 5000,
        },
        Implementation {
            name: "resource/file/2048",
            buffer: ResourceBuffer::new(2048, Box::new(tempfile::tempfile().unwrap())),
            size: 2048,
        },
    ]
}

/// `n` copies of `byte`.
pub fn repeat(byte: u8, n: usize) -> Vec<u8> {
    vec![byte; n]
}
