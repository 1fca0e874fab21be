//! Fault injection plan for instrumented stores
//!
//! Describes how an [`InstrumentedStore`](super::InstrumentedStore) should
//! misbehave. Faults are deterministic: a budget is consumed by successful
//! transfers, and once it is exhausted the store starts returning short
//! counts.
//!
//! # Example
//!
//! ```ignore
//! use stratabuf_storage::testing::FaultPlan;
//!
//! // Accept 100 more bytes, then report zero-length writes
//! let plan = FaultPlan::new().fail_writes_after(100);
//! ```

/// Deterministic fault configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    /// Bytes the store still accepts before writes come back short
    pub write_budget: Option<u64>,
    /// Bytes the store still returns before reads come back short
    pub read_budget: Option<u64>,
    /// Every read fails with an I/O error
    pub fail_reads: bool,
    /// Every seek fails with an I/O error
    pub fail_seeks: bool,
    /// Flush on close fails with an I/O error
    pub fail_close: bool,
}

impl FaultPlan {
    /// A plan with no faults (baseline)
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `bytes` more bytes, then report zero-length writes
    pub fn fail_writes_after(mut self, bytes: u64) -> Self {
        self.write_budget = Some(bytes);
        self
    }

    /// Return `bytes` more bytes, then report end of data
    pub fn truncate_reads_after(mut self, bytes: u64) -> Self {
        self.read_budget = Some(bytes);
        self
    }

    /// Fail every read with an I/O error
    pub fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Fail every seek with an I/O error
    pub fn fail_seeks(mut self) -> Self {
        self.fail_seeks = true;
        self
    }

    /// Fail the flush performed on close
    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Whether any fault is configured
    pub fn is_faulty(&self) -> bool {
        self.write_budget.is_some()
            || self.read_budget.is_some()
            || self.fail_reads
            || self.fail_seeks
            || self.fail_close
    }

    /// Charge `wanted` bytes against a budget, returning how many are allowed.
    pub(crate) fn charge(budget: &mut Option<u64>, wanted: usize) -> usize {
        match budget {
            None => wanted,
            Some(left) => {
                let allowed = (*left).min(wanted as u64);
                *left -= allowed;
                allowed as usize
            }
        }
    }
}
