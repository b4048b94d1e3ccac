//! Operators for performing various operations on data in a job
mod count;
mod filter;
mod inspect;
mod key_by;
mod map;
mod sink;

pub use count::Count;
pub use filter::Filter;
pub use inspect::Inspect;
pub use key_by::KeyBy;
pub use map::Map;
pub use sink::ForEachBatch;

// marker used to seal the traits implementing operators
// on the stream builders
mod sealed {
    use crate::stream::{AggregatedStream, KeyedStream, StreamBuilder};

    pub trait Sealed {}

    impl<V> Sealed for StreamBuilder<V> {}
    impl<K, V> Sealed for KeyedStream<K, V> {}
    impl<K> Sealed for AggregatedStream<K> {}
}
