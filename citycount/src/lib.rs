//! Streaming job which consumes JSON customer events from a Kafka topic,
//! counts customers per city and prints the running totals on every
//! micro-batch.
pub mod config;
pub mod schema;
pub mod sink;

mod dataflow;

pub use dataflow::build_dataflow;
