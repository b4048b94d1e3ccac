//! Runtime representation of a wired operator chain. Every operator wraps its
//! upstream stage, so a fully wired stream collapses into a single pollable
//! chain the run loop can drain.

/// One link in a wired operator chain
pub(crate) trait Stage<V> {
    /// Poll for the next available record, if any
    fn poll(&mut self) -> Option<V>;

    /// True once this chain can never produce another record
    fn is_finished(&mut self) -> bool;
}

/// Stage of a stream which has no source attached yet
pub(crate) struct EmptyStage;

impl Stage<()> for EmptyStage {
    fn poll(&mut self) -> Option<()> {
        None
    }

    fn is_finished(&mut self) -> bool {
        true
    }
}
