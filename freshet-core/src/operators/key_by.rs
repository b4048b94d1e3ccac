use crate::stream::{KeyedStream, StreamBuilder};
use crate::types::{Data, Key};

/// Assign a grouping key to every record in a stream
pub trait KeyBy<V>: super::sealed::Sealed {
    /// Declare the grouping key of this stream by deriving a key from every
    /// record. Records with equal keys form one group in downstream
    /// aggregations.
    ///
    /// Any key works as long as it implements
    /// `Clone + Eq + Hash + Ord + Debug`. Missing values can be modeled with
    /// an `Option` key: `None` forms its own group and sorts before every
    /// other key.
    fn key_by<K: Key>(
        self,
        name: &str,
        key_fn: impl FnMut(&V) -> K + 'static,
    ) -> KeyedStream<K, V>;
}

impl<V> KeyBy<V> for StreamBuilder<V>
where
    V: Data,
{
    fn key_by<K: Key>(
        mut self,
        name: &str,
        key_fn: impl FnMut(&V) -> K + 'static,
    ) -> KeyedStream<K, V> {
        self.names.push(name.to_owned());
        KeyedStream {
            stage: self.stage,
            key_fn: Box::new(key_fn),
            names: self.names,
            runtime: self.runtime,
        }
    }
}
