//! Types and traits used across Freshet
mod batch;
mod data;
mod key;

pub use batch::{BatchId, BatchMeta, OutputMode};
pub use data::Data;
pub use key::Key;
