//! Sinks for writing aggregated batches out of a Freshet job
mod table;
mod vec_sink;

pub use table::{render_table, DEFAULT_MAX_ROWS};
pub use vec_sink::VecBatchSink;

use crate::types::BatchMeta;

/// Receives the aggregate rows of a pipeline on every fired micro-batch.
///
/// `rows` is the row set dictated by the stream's
/// [OutputMode](crate::types::OutputMode), always in ascending key order.
/// Errors inside a sink are not caught by the run loop; a sink which cannot
/// write its output should abort the job.
pub trait BatchSink<K>: 'static {
    /// Called once per fired batch
    fn on_batch(&mut self, meta: BatchMeta, rows: &[(K, u64)]);
}
