//! Buffer configuration
//!
//! A `BufferConfig` names a capacity, a store provider and optional fill
//! overrides. It can be built in code or loaded from TOML:
//!
//! ```toml
//! size = 1048576
//! # fill_chunk_size = 8192   # override the store's default chunk
//! # eager_fill = false       # override the store's default strategy
//!
//! [store]
//! kind = "spooled"           # "memory", "spooled" or "temp_file"
//! max_memory = 2097152
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stratabuf_core::{BufferError, Result};
use stratabuf_storage::StoreKind;

use crate::buffer::ResourceBuffer;
use crate::policy::{FillPolicy, FillStrategy};

/// Buffer configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Logical capacity in bytes.
    pub size: u64,

    /// Maximum zero bytes per store write; defaults per provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_chunk_size: Option<usize>,

    /// Force eager (`true`) or lazy (`false`) zero-fill; defaults per provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eager_fill: Option<bool>,

    /// Store provider (default: spooled with a 2MB threshold).
    #[serde(default)]
    pub store: StoreKind,
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig {
            size: 0,
            fill_chunk_size: None,
            eager_fill: None,
            store: StoreKind::default(),
        }
    }
}

impl BufferConfig {
    /// Configuration for a buffer of `size` bytes with default store.
    pub fn new(size: u64) -> Self {
        BufferConfig {
            size,
            ..Self::default()
        }
    }

    /// Set store provider (builder pattern).
    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    /// Set fill chunk size (builder pattern).
    pub fn with_fill_chunk_size(mut self, chunk_size: usize) -> Self {
        self.fill_chunk_size = Some(chunk_size);
        self
    }

    /// Force eager or lazy fill (builder pattern).
    pub fn with_eager_fill(mut self, eager: bool) -> Self {
        self.eager_fill = Some(eager);
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> std::result::Result<(), BufferConfigError> {
        if self.fill_chunk_size == Some(0) {
            return Err(BufferConfigError::ZeroChunkSize);
        }
        if let StoreKind::Spooled { max_memory: 0 } = self.store {
            return Err(BufferConfigError::ZeroMemoryThreshold);
        }
        Ok(())
    }

    /// Fill policy: the store's default with this config's overrides applied.
    pub fn fill_policy(&self) -> FillPolicy {
        let mut policy = FillPolicy::for_store(&self.store);
        if let Some(chunk_size) = self.fill_chunk_size {
            policy = policy.with_chunk_size(chunk_size);
        }
        match self.eager_fill {
            Some(true) => policy.with_strategy(FillStrategy::Eager),
            Some(false) => policy.with_strategy(FillStrategy::Lazy),
            None => policy,
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, BufferConfigError> {
        toml::from_str(text).map_err(|e| BufferConfigError::Parse(e.to_string()))
    }

    /// Load and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, BufferConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| BufferConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

/// Buffer configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferConfigError {
    /// Fill chunk size of zero would never make progress.
    #[error("Fill chunk size must be at least 1 byte")]
    ZeroChunkSize,

    /// Spooled store with a zero memory threshold.
    #[error("Spooled store needs a memory threshold of at least 1 byte; use temp_file for disk-only")]
    ZeroMemoryThreshold,

    /// TOML could not be parsed.
    #[error("Invalid buffer config: {0}")]
    Parse(String),

    /// Config file could not be read.
    #[error("Cannot read buffer config {}: {}", .path.display(), .reason)]
    Read {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },
}

impl From<BufferConfigError> for BufferError {
    fn from(e: BufferConfigError) -> Self {
        BufferError::InvalidConfig(e.to_string())
    }
}

impl ResourceBuffer {
    /// Build a buffer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if validation fails, `StoreOpen` if the store
    /// cannot be opened, or `FatalWrite` if an eager fill fails.
    pub fn from_config(config: &BufferConfig) -> Result<Self> {
        config.validate()?;
        Self::open_with_policy(config.size, config.store, config.fill_policy())
    }
}
