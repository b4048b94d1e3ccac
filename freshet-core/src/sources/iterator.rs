use std::iter::Peekable;

use crate::types::Data;

use super::{SourceImpl, SourcePartition};

/// A datasource which yields values from an iterator as a single partition.
///
/// Bounded iterators make the pipeline complete once they are exhausted,
/// which is mainly useful in tests and examples. An unbounded iterator
/// gives an unbounded source.
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
///         .source("numbers", IteratorSource::new(0..10))
///         .key_by("odd-even", |x: &i32| x & 1)
///         .count("count")
///         .for_each_batch("sink", sink_clone);
///     })
///     .execute()
///     .unwrap();
///
/// let batches = sink.batches();
/// let (_, rows) = batches.last().unwrap();
/// assert_eq!(rows, &vec![(0, 5), (1, 5)]);
/// ```
pub struct IteratorSource<T>(Option<Box<dyn Iterator<Item = T>>>);

impl<T> IteratorSource<T> {
    /// Create a new source from an iterable value
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        <I as IntoIterator>::IntoIter: 'static,
    {
        Self(Some(Box::new(iter.into_iter())))
    }
}

impl<V> SourceImpl<V> for IteratorSource<V>
where
    V: Data,
{
    type Part = ();
    type SourcePartition = IteratorPartition<V>;

    fn list_parts(&self) -> Vec<Self::Part> {
        vec![()]
    }

    fn build_part(&mut self, _part: &Self::Part) -> Self::SourcePartition {
        match self.0.take() {
            Some(x) => IteratorPartition(x.peekable()),
            None => unreachable!("IteratorSource only has one part"),
        }
    }
}

/// The single partition of an [IteratorSource]
pub struct IteratorPartition<V>(Peekable<Box<dyn Iterator<Item = V>>>);

impl<V> SourcePartition<V> for IteratorPartition<V> {
    fn poll(&mut self) -> Option<V> {
        self.0.next()
    }

    fn is_finished(&mut self) -> bool {
        self.0.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use itertools::Itertools;

    use super::IteratorSource;
    use crate::operators::{Count, ForEachBatch, Inspect, KeyBy};
    use crate::sinks::VecBatchSink;
    use crate::testing::get_test_rt;

    /// the iterator source should emit the iterator values in order
    #[test]
    fn emits_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let collector = VecBatchSink::new();
        let collector_clone = collector.clone();

        let rt = get_test_rt(move |provider| {
            provider
                .new_stream()
                .source("source", IteratorSource::new(0..100))
                .inspect("watch", move |x: &i32| seen_clone.lock().unwrap().push(*x))
                .key_by("key", |x: &i32| *x)
                .count("count")
                .for_each_batch("collect", collector_clone);
        });
        rt.execute().unwrap();

        assert_eq!(*seen.lock().unwrap(), (0..100).collect_vec());
    }
}
