//! Freshet is a small single-process micro-batch stream processing core.
//!
//! A Freshet job wires one or more linear pipelines: a partitioned source,
//! a chain of per-record operators, a keyed running aggregation and a batch
//! sink which is invoked once per fired micro-batch. Execution blocks until
//! every pipeline completes or the process is terminated externally.
pub mod errorhandling;
pub mod operators;
pub mod runtime;
pub mod sinks;
pub mod sources;
pub mod stream;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
