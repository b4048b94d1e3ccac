use std::sync::{Arc, Mutex};

use crate::types::{BatchId, BatchMeta};

use super::BatchSink;

/// A helper which records every fired batch into a shared vector.
/// This is mainly useful to extract batches from a pipeline in unit tests.
/// This struct uses an `Arc<Mutex<Vec<T>>>` internally, so it can be freely
/// cloned.
#[derive(Clone)]
pub struct VecBatchSink<K> {
    inner: Arc<Mutex<Vec<(BatchId, Vec<(K, u64)>)>>>,
}

impl<K> Default for VecBatchSink<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> VecBatchSink<K> {
    /// Create a new empty sink
    pub fn new() -> Self {
        VecBatchSink {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all batches recorded so far
    pub fn batches(&self) -> Vec<(BatchId, Vec<(K, u64)>)>
    where
        K: Clone,
    {
        self.inner.lock().unwrap().clone()
    }

    /// Returns the number of recorded batches
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// True if no batch has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl<K> BatchSink<K> for VecBatchSink<K>
where
    K: Clone + 'static,
{
    fn on_batch(&mut self, meta: BatchMeta, rows: &[(K, u64)]) {
        self.inner
            .lock()
            .unwrap()
            .push((meta.batch_id, rows.to_vec()));
    }
}
