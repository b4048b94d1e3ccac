//! Sources for bringing data into a Freshet job
mod iterator;

use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::debug;

use crate::stream::stage::Stage;

pub use iterator::{IteratorPartition, IteratorSource};

/// A partitioned datasource.
///
/// A source consists of one or more partitions which are polled round-robin
/// by the run loop. For a Kafka topic the parts are the topic's partitions;
/// for an in-memory source there is usually a single part.
pub trait SourceImpl<V>: 'static {
    /// Identifies one partition of this source
    type Part: Clone + Debug + 'static;
    /// The partition type built for each part
    type SourcePartition: SourcePartition<V> + 'static;

    /// List all partitions of this source
    fn list_parts(&self) -> Vec<Self::Part>;

    /// Build the partition for the given part
    fn build_part(&mut self, part: &Self::Part) -> Self::SourcePartition;
}

/// A single partition of a [SourceImpl]
pub trait SourcePartition<V> {
    /// Poll this partition for the next available record without blocking
    fn poll(&mut self) -> Option<V>;

    /// Return true if this partition can never produce another record
    fn is_finished(&mut self) -> bool;
}

/// Polls the partitions of a source round-robin so no partition can starve
/// the others within a batch interval.
pub(crate) struct SourceStage<V, S: SourceImpl<V>> {
    partitions: Vec<S::SourcePartition>,
    cursor: usize,
    _marker: PhantomData<V>,
}

impl<V, S: SourceImpl<V>> SourceStage<V, S> {
    pub(crate) fn new(name: &str, mut source: S) -> Self {
        let parts = source.list_parts();
        debug!(source = name, parts = parts.len(), "building source partitions");
        let partitions = parts.iter().map(|p| source.build_part(p)).collect();
        Self {
            partitions,
            cursor: 0,
            _marker: PhantomData,
        }
    }
}

impl<V, S: SourceImpl<V>> Stage<V> for SourceStage<V, S> {
    fn poll(&mut self) -> Option<V> {
        let partition_count = self.partitions.len();
        for i in 0..partition_count {
            let idx = (self.cursor + i) % partition_count;
            if let Some(value) = self.partitions[idx].poll() {
                self.cursor = (idx + 1) % partition_count;
                return Some(value);
            }
        }
        None
    }

    fn is_finished(&mut self) -> bool {
        self.partitions.iter_mut().all(|p| p.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{SourceImpl, SourcePartition};
    use crate::operators::{Count, ForEachBatch, Inspect, KeyBy};
    use crate::sinks::VecBatchSink;
    use crate::testing::get_test_rt;

    /// A source with two bounded partitions, each yielding three values
    struct PairSource;

    struct RangePartition(std::iter::Peekable<std::ops::Range<i32>>);

    impl SourceImpl<i32> for PairSource {
        type Part = i32;
        type SourcePartition = RangePartition;

        fn list_parts(&self) -> Vec<i32> {
            vec![0, 1]
        }

        fn build_part(&mut self, part: &i32) -> RangePartition {
            let start = part * 10;
            RangePartition((start..start + 3).peekable())
        }
    }

    impl SourcePartition<i32> for RangePartition {
        fn poll(&mut self) -> Option<i32> {
            self.0.next()
        }

        fn is_finished(&mut self) -> bool {
            self.0.peek().is_none()
        }
    }

    /// partitions are drained round-robin, one record at a time
    #[test]
    fn polls_partitions_round_robin() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let collector = VecBatchSink::new();
        let collector_clone = collector.clone();

        let rt = get_test_rt(move |provider| {
            provider
                .new_stream()
                .source("pair", PairSource)
                .inspect("watch", move |x: &i32| seen_clone.lock().unwrap().push(*x))
                .key_by("key", |x: &i32| *x)
                .count("count")
                .for_each_batch("collect", collector_clone);
        });
        rt.execute().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 10, 1, 11, 2, 12]);
    }
}
