use crate::stream::stage::Stage;
use crate::stream::StreamBuilder;
use crate::types::Data;

/// Observe every record in a stream without modifying it
pub trait Inspect<V>: super::sealed::Sealed {
    /// Call the given function on every record passing through the stream.
    /// Useful for debugging and ad-hoc logging.
    fn inspect(self, name: &str, inspector: impl FnMut(&V) + 'static) -> StreamBuilder<V>;
}

struct InspectStage<V, F> {
    upstream: Box<dyn Stage<V>>,
    inspector: F,
}

impl<V, F> Stage<V> for InspectStage<V, F>
where
    F: FnMut(&V),
{
    fn poll(&mut self) -> Option<V> {
        let value = self.upstream.poll()?;
        (self.inspector)(&value);
        Some(value)
    }

    fn is_finished(&mut self) -> bool {
        self.upstream.is_finished()
    }
}

impl<V> Inspect<V> for StreamBuilder<V>
where
    V: Data,
{
    fn inspect(mut self, name: &str, inspector: impl FnMut(&V) + 'static) -> StreamBuilder<V> {
        self.names.push(name.to_owned());
        StreamBuilder {
            stage: Box::new(InspectStage {
                upstream: self.stage,
                inspector,
            }),
            names: self.names,
            runtime: self.runtime,
        }
    }
}
