use crate::sinks::BatchSink;
use crate::stream::AggregatedStream;
use crate::types::Key;

use super::count::CountPipeline;

/// Terminate a stream with a batch sink
pub trait ForEachBatch<K>: super::sealed::Sealed {
    /// Attach a [BatchSink] which is invoked once per fired micro-batch with
    /// the aggregate rows of this stream. This finishes the stream and
    /// registers the pipeline with the runtime it was created on.
    fn for_each_batch(self, name: &str, sink: impl BatchSink<K>);
}

impl<K> ForEachBatch<K> for AggregatedStream<K>
where
    K: Key,
{
    fn for_each_batch(self, name: &str, sink: impl BatchSink<K>) {
        let AggregatedStream {
            stage,
            mode,
            mut names,
            runtime,
        } = self;
        names.push(name.to_owned());
        let pipeline = CountPipeline::new(stage, mode, names, Box::new(sink));
        #[allow(clippy::unwrap_used)]
        runtime.lock().unwrap().add_pipeline(Box::new(pipeline));
    }
}
