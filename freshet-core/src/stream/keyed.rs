//! Streams which carry a grouping key or a keyed aggregate

use std::{rc::Rc, sync::Mutex};

use crate::{runtime::InnerRuntimeBuilder, types::OutputMode};

use super::stage::Stage;

/// A stream whose records have been assigned a grouping key via
/// [KeyBy](crate::operators::KeyBy). Aggregation operators like
/// [Count](crate::operators::Count) consume it.
pub struct KeyedStream<K, V> {
    pub(crate) stage: Box<dyn Stage<V>>,
    pub(crate) key_fn: Box<dyn FnMut(&V) -> K>,
    pub(crate) names: Vec<String>,
    pub(crate) runtime: Rc<Mutex<InnerRuntimeBuilder>>,
}

/// A keyed stream reduced to one aggregate row per distinct key. Terminate it
/// with [ForEachBatch](crate::operators::ForEachBatch) to receive the rows on
/// every fired micro-batch.
pub struct AggregatedStream<K> {
    pub(crate) stage: Box<dyn Stage<K>>,
    pub(crate) mode: OutputMode,
    pub(crate) names: Vec<String>,
    pub(crate) runtime: Rc<Mutex<InnerRuntimeBuilder>>,
}

impl<K> AggregatedStream<K> {
    /// Select how aggregate rows are emitted on every batch.
    /// Defaults to [OutputMode::Complete].
    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}
