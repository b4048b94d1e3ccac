use std::marker::PhantomData;

use crate::stream::stage::Stage;
use crate::stream::StreamBuilder;
use crate::types::Data;

/// Apply a function to every record in a stream
pub trait Map<V, VO>: super::sealed::Sealed {
    /// Map transforms every value in a datastream into a different value
    /// by applying a given function or closure.
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
    ///         .source("words", IteratorSource::new(["hi", "ho", "hey"]))
    ///         .map("get-len", |x: &str| x.len())
    ///         .key_by("by-len", |len: &usize| *len)
    ///         .count("count")
    ///         .for_each_batch("sink", sink_clone);
    ///     })
    ///     .execute()
    ///     .unwrap();
    ///
    /// let batches = sink.batches();
    /// let (_, rows) = batches.last().unwrap();
    /// assert_eq!(rows, &vec![(2, 2), (3, 1)]);
    /// ```
    fn map(self, name: &str, mapper: impl FnMut(V) -> VO + 'static) -> StreamBuilder<VO>;
}

struct MapStage<V, VO, F> {
    upstream: Box<dyn Stage<V>>,
    mapper: F,
    _marker: PhantomData<VO>,
}

impl<V, VO, F> Stage<VO> for MapStage<V, VO, F>
where
    F: FnMut(V) -> VO,
{
    fn poll(&mut self) -> Option<VO> {
        self.upstream.poll().map(&mut self.mapper)
    }

    fn is_finished(&mut self) -> bool {
        self.upstream.is_finished()
    }
}

impl<V, VO> Map<V, VO> for StreamBuilder<V>
where
    V: Data,
    VO: Data,
{
    fn map(mut self, name: &str, mapper: impl FnMut(V) -> VO + 'static) -> StreamBuilder<VO> {
        self.names.push(name.to_owned());
        StreamBuilder {
            stage: Box::new(MapStage {
                upstream: self.stage,
                mapper,
                _marker: PhantomData,
            }),
            names: self.names,
            runtime: self.runtime,
        }
    }
}
