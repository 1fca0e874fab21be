//! Storage layer for StrataBuf
//!
//! This crate implements the backing stores that buffers are built on:
//! - BackingStore: seek / write / read / close capability set
//! - StoreKind: Memory, Spooled (memory up to a threshold, then disk), TempFile
//! - Testing utilities: instrumented store with deterministic fault injection
//!
//! Stores are opaque byte resources. Capacity, clamping and zero-fill are the
//! engine's business, not the store's.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kind;
pub mod store;
pub mod testing;

pub use kind::{effective_threshold, open_memory, open_spooled, StoreKind};
pub use store::BackingStore;
