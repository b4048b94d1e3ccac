//! Builder for datastreams

use std::{rc::Rc, sync::Mutex};

use crate::{
    runtime::InnerRuntimeBuilder,
    sources::{SourceImpl, SourceStage},
    types::Data,
};

use super::stage::{EmptyStage, Stage};

/// The StreamBuilder allows building datastreams by calling operator methods
/// like `.map` or `.filter` on it. A stream must be terminated by keying it,
/// aggregating it and attaching a batch sink, which registers the finished
/// pipeline with the runtime it was created on.
pub struct StreamBuilder<V> {
    pub(crate) stage: Box<dyn Stage<V>>,
    pub(crate) names: Vec<String>,
    pub(crate) runtime: Rc<Mutex<InnerRuntimeBuilder>>,
}

impl StreamBuilder<()> {
    pub(crate) fn new_empty(runtime: Rc<Mutex<InnerRuntimeBuilder>>) -> Self {
        Self {
            stage: Box::new(EmptyStage),
            names: Vec::new(),
            runtime,
        }
    }

    /// Attach a source to this stream. The source's partitions are built
    /// immediately and polled round-robin once execution starts.
    pub fn source<V, S>(self, name: &str, source: S) -> StreamBuilder<V>
    where
        V: Data,
        S: SourceImpl<V>,
    {
        let mut names = self.names;
        names.push(name.to_owned());
        StreamBuilder {
            stage: Box::new(SourceStage::new(name, source)),
            names,
            runtime: self.runtime,
        }
    }
}
