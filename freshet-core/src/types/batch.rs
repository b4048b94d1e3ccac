//! Micro-batch identifiers and per-batch metadata

/// Sequential identifier of a fired micro-batch, starting at 0 per pipeline
pub type BatchId = u64;

/// Metadata describing one fired micro-batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchMeta {
    /// Identifier of this batch
    pub batch_id: BatchId,
    /// Number of records consumed during this batch interval
    pub records: usize,
}

/// How an aggregation emits its rows on every fired batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Re-emit the full aggregate table on every batch
    #[default]
    Complete,
    /// Emit only the rows whose value changed during the batch interval
    Update,
}
