use crate::stream::stage::Stage;
use crate::stream::StreamBuilder;
use crate::types::Data;

/// Keep only records matching a predicate
pub trait Filter<V>: super::sealed::Sealed {
    /// Filter retains all records for which the given predicate returns
    /// `true` and discards all others.
    fn filter(self, name: &str, predicate: impl FnMut(&V) -> bool + 'static) -> StreamBuilder<V>;
}

struct FilterStage<V, F> {
    upstream: Box<dyn Stage<V>>,
    predicate: F,
}

impl<V, F> Stage<V> for FilterStage<V, F>
where
    F: FnMut(&V) -> bool,
{
    fn poll(&mut self) -> Option<V> {
        while let Some(value) = self.upstream.poll() {
            if (self.predicate)(&value) {
                return Some(value);
            }
        }
        None
    }

    fn is_finished(&mut self) -> bool {
        self.upstream.is_finished()
    }
}

impl<V> Filter<V> for StreamBuilder<V>
where
    V: Data,
{
    fn filter(mut self, name: &str, predicate: impl FnMut(&V) -> bool + 'static) -> StreamBuilder<V> {
        self.names.push(name.to_owned());
        StreamBuilder {
            stage: Box::new(FilterStage {
                upstream: self.stage,
                predicate,
            }),
            names: self.names,
            runtime: self.runtime,
        }
    }
}
