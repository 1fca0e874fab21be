//! Testing utilities for buffer engines
//!
//! This module provides tools for testing engines built on backing stores:
//!
//! - **Instrumented Store**: In-memory store that records seeks, writes and reads
//! - **Fault Plan**: Deterministic short writes, short reads and I/O errors
//!
//! # Example
//!
//! ```ignore
//! use stratabuf_storage::testing::{FaultPlan, InstrumentedStore};
//!
//! let store = InstrumentedStore::with_faults(FaultPlan::new().fail_writes_after(64));
//! let handle = store.handle();
//! // hand `store` to a buffer, then inspect `handle.stats()`
//! ```

mod fault;
mod instrumented;

pub use fault::FaultPlan;
pub use instrumented::{InstrumentedStore, StatsHandle, StoreStats};
