use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::runtime::Pipeline;
use crate::sinks::BatchSink;
use crate::stream::stage::Stage;
use crate::stream::{AggregatedStream, KeyedStream};
use crate::types::{BatchMeta, Data, Key, OutputMode};

/// Count records per distinct key
pub trait Count<K, V>: super::sealed::Sealed {
    /// Maintain a running count per distinct key value.
    ///
    /// The count is cumulative for the lifetime of the query: it is never
    /// windowed and never reset. On every fired micro-batch the aggregate
    /// rows are handed to the batch sink in ascending key order; whether all
    /// rows or only the changed ones are emitted depends on the stream's
    /// [OutputMode].
    ///
    /// # Example
    /// ```rust
    /// use freshet::operators::*;
    /// use freshet::runtime::{MicroBatchRuntime, StreamProvider};
    /// use freshet::sinks::VecBatchSink;
    /// use freshet::sources::IteratorSource;
    /// use std::time::Duration;
    ///
    /// let sink = VecBatchSink::new();
    /// let sink_clone = sink.clone();
    ///
    /// MicroBatchRuntime::builder()
    ///     .trigger(Duration::ZERO)
    ///     .build(move |provider: &mut dyn StreamProvider| {
    ///         provider.new_stream()
    ///         .source("pets", IteratorSource::new(["cat", "dog", "cat"]))
    ///         .key_by("by-pet", |pet: &&str| (*pet).to_owned())
    ///         .count("pet-count")
    ///         .for_each_batch("sink", sink_clone);
    ///     })
    ///     .execute()
    ///     .unwrap();
    ///
    /// let batches = sink.batches();
    /// let (_, rows) = batches.last().unwrap();
    /// assert_eq!(rows, &vec![("cat".to_owned(), 2), ("dog".to_owned(), 1)]);
    /// ```
    fn count(self, name: &str) -> AggregatedStream<K>;
}

/// Collapses a keyed stream into a stream of bare keys, which is all the
/// counting aggregation needs to observe.
struct KeyStage<K, V> {
    upstream: Box<dyn Stage<V>>,
    key_fn: Box<dyn FnMut(&V) -> K>,
}

impl<K, V> Stage<K> for KeyStage<K, V> {
    fn poll(&mut self) -> Option<K> {
        self.upstream.poll().map(|value| (self.key_fn)(&value))
    }

    fn is_finished(&mut self) -> bool {
        self.upstream.is_finished()
    }
}

impl<K, V> Count<K, V> for KeyedStream<K, V>
where
    K: Key,
    V: Data,
{
    fn count(mut self, name: &str) -> AggregatedStream<K> {
        self.names.push(name.to_owned());
        AggregatedStream {
            stage: Box::new(KeyStage {
                upstream: self.stage,
                key_fn: self.key_fn,
            }),
            mode: OutputMode::default(),
            names: self.names,
            runtime: self.runtime,
        }
    }
}

/// A fully wired pipeline ending in a counting aggregation and a batch sink
pub(crate) struct CountPipeline<K> {
    names: Vec<String>,
    upstream: Box<dyn Stage<K>>,
    counts: IndexMap<K, u64>,
    /// keys whose count changed during the current batch interval
    changed: IndexSet<K>,
    mode: OutputMode,
    sink: Box<dyn BatchSink<K>>,
}

impl<K: Key> CountPipeline<K> {
    pub(crate) fn new(
        upstream: Box<dyn Stage<K>>,
        mode: OutputMode,
        names: Vec<String>,
        sink: Box<dyn BatchSink<K>>,
    ) -> Self {
        Self {
            names,
            upstream,
            counts: IndexMap::new(),
            changed: IndexSet::new(),
            mode,
            sink,
        }
    }
}

impl<K: Key> Pipeline for CountPipeline<K> {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn drain(&mut self, max: usize) -> usize {
        let mut consumed = 0;
        while consumed < max {
            let Some(key) = self.upstream.poll() else {
                break;
            };
            *self.counts.entry(key.clone()).or_insert(0) += 1;
            self.changed.insert(key);
            consumed += 1;
        }
        consumed
    }

    fn fire(&mut self, meta: BatchMeta) {
        let rows: Vec<(K, u64)> = match self.mode {
            OutputMode::Complete => self
                .counts
                .iter()
                .map(|(key, count)| (key.clone(), *count))
                .sorted_by(|a, b| a.0.cmp(&b.0))
                .collect(),
            OutputMode::Update => self
                .changed
                .iter()
                .map(|key| (key.clone(), self.counts.get(key).copied().unwrap_or(0)))
                .sorted_by(|a, b| a.0.cmp(&b.0))
                .collect(),
        };
        self.changed.clear();
        self.sink.on_batch(meta, &rows);
    }

    fn is_finished(&mut self) -> bool {
        self.upstream.is_finished()
    }
}
