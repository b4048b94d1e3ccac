//! The runtime drives every wired pipeline through repeated micro-batches:
//! drain available records, fold them into the aggregate, fire the batch
//! sink, sleep out the trigger interval.

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use bon::Builder;
use thiserror::Error;
use tracing::{debug, info};

use crate::stream::StreamBuilder;
use crate::types::{BatchId, BatchMeta};

/// A fully wired pipeline the run loop can drive. Constructed by terminal
/// operators such as [ForEachBatch](crate::operators::ForEachBatch).
pub(crate) trait Pipeline {
    /// The names of all operators wired into this pipeline
    fn names(&self) -> &[String];

    /// Drain up to `max` available records into the aggregate.
    /// Returns the number of records consumed.
    fn drain(&mut self, max: usize) -> usize;

    /// Invoke the batch sink for one fired micro-batch
    fn fire(&mut self, meta: BatchMeta);

    /// True once the pipeline's source can never produce another record
    fn is_finished(&mut self) -> bool;
}

#[derive(Default)]
pub(crate) struct InnerRuntimeBuilder {
    pipelines: Vec<Box<dyn Pipeline>>,
}

impl InnerRuntimeBuilder {
    pub(crate) fn add_pipeline(&mut self, pipeline: Box<dyn Pipeline>) {
        self.pipelines.push(pipeline)
    }

    // destroy this builder and return the pipelines
    fn finish(self) -> Vec<Box<dyn Pipeline>> {
        self.pipelines
    }
}

/// Creates new streams to add to the job
pub trait StreamProvider {
    /// Create a new empty stream. This stream will not contain any data.
    /// Call `.source()` on the stream to add a source.
    fn new_stream(&mut self) -> StreamBuilder<()>;
}

struct RuntimeStreamProvider {
    inner: Rc<Mutex<InnerRuntimeBuilder>>,
}

impl StreamProvider for RuntimeStreamProvider {
    fn new_stream(&mut self) -> StreamBuilder<()> {
        StreamBuilder::new_empty(Rc::clone(&self.inner))
    }
}

/// Runs all wired pipelines in micro-batches on the calling thread.
///
/// The build closure receives a [StreamProvider] and wires one or more
/// streams; [execute](MicroBatchRuntime::execute) then blocks until every
/// pipeline completes. Pipelines over unbounded sources never complete on
/// their own, so execution only ends through external termination or a
/// [StopHandle].
#[derive(Builder)]
pub struct MicroBatchRuntime<F> {
    #[builder(finish_fn)]
    build: F,
    /// Micro-batch cadence. A zero trigger re-batches as fast as records
    /// arrive, which is mainly useful for tests over bounded sources.
    #[builder(default = Duration::from_millis(100))]
    trigger: Duration,
    /// Cap on records drained into a single batch per pipeline
    #[builder(default = 10_000)]
    max_batch_records: usize,
    #[builder(skip = flume::bounded(1))]
    stop: (flume::Sender<()>, flume::Receiver<()>),
}

/// Cooperatively stops a running [MicroBatchRuntime].
///
/// Stopping makes every pipeline fire one final batch for any records
/// drained in the last interval, after which `execute` returns.
#[derive(Clone)]
pub struct StopHandle {
    tx: flume::Sender<()>,
}

impl StopHandle {
    /// Request the run loop to stop. Never blocks; repeated requests are
    /// no-ops.
    pub fn stop(&self) {
        let _ = self.tx.try_send(());
    }
}

struct RunState {
    next_batch_id: BatchId,
    completed: bool,
}

impl<F> MicroBatchRuntime<F>
where
    F: FnOnce(&mut dyn StreamProvider),
{
    /// Obtain a handle which can stop this runtime once it is executing
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop.0.clone(),
        }
    }

    /// Wire all streams and drive them until completion, blocking the
    /// calling thread. Returns a build error if the wired streams are
    /// invalid.
    pub fn execute(self) -> Result<(), ExecutionError> {
        let MicroBatchRuntime {
            build,
            trigger,
            max_batch_records,
            stop,
        } = self;

        let inner = Rc::new(Mutex::new(InnerRuntimeBuilder::default()));
        {
            let mut provider = RuntimeStreamProvider {
                inner: Rc::clone(&inner),
            };
            build(&mut provider);
        }
        let ref_count = Rc::strong_count(&inner);
        let inner =
            Rc::try_unwrap(inner).map_err(|_| ExecutionError::UnfinishedStreams(ref_count - 1))?;
        #[allow(clippy::unwrap_used)]
        let mut pipelines = inner.into_inner().unwrap().finish();

        if pipelines.is_empty() {
            return Err(ExecutionError::NoPipelines);
        }
        let mut seen_names = HashSet::new();
        for name in pipelines.iter().flat_map(|p| p.names().iter()) {
            if !seen_names.insert(name.as_str()) {
                return Err(ExecutionError::NonUniqueName(name.clone()));
            }
        }
        drop(seen_names);

        info!(pipelines = pipelines.len(), "starting micro-batch execution");
        let stop_rx = stop.1;
        let mut stop_requested = false;
        let mut states: Vec<RunState> = pipelines
            .iter()
            .map(|_| RunState {
                next_batch_id: 0,
                completed: false,
            })
            .collect();

        loop {
            let tick_start = Instant::now();
            stop_requested |= stop_rx.try_recv().is_ok();

            let mut all_completed = true;
            let mut backlog = false;
            for (pipeline, state) in pipelines.iter_mut().zip(states.iter_mut()) {
                if state.completed {
                    continue;
                }
                let consumed = pipeline.drain(max_batch_records);
                backlog |= consumed == max_batch_records;
                // batch 0 always fires so sinks observe the empty aggregate,
                // afterwards a batch fires only when records arrived
                if consumed > 0 || state.next_batch_id == 0 {
                    let meta = BatchMeta {
                        batch_id: state.next_batch_id,
                        records: consumed,
                    };
                    debug!(
                        batch_id = meta.batch_id,
                        records = consumed,
                        "firing micro-batch"
                    );
                    pipeline.fire(meta);
                    state.next_batch_id += 1;
                }
                if pipeline.is_finished() || stop_requested {
                    debug!(batches = state.next_batch_id, "pipeline completed");
                    state.completed = true;
                }
                all_completed &= state.completed;
            }
            if all_completed {
                break;
            }
            if !backlog {
                if let Some(remaining) = trigger.checked_sub(tick_start.elapsed()) {
                    if stop_rx.recv_timeout(remaining).is_ok() {
                        stop_requested = true;
                    }
                }
            }
        }
        info!("execution finished");
        Ok(())
    }
}

/// Possible errors when starting execution of a runtime
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(
        "{0} unfinished streams in this runtime.
    Every stream must be terminated with `for_each_batch`
    inside the build closure"
    )]
    UnfinishedStreams(usize),
    #[error("operator name '{0}' is not unique. Rename this operator.")]
    NonUniqueName(String),
    #[error("the build closure wired no pipelines")]
    NoPipelines,
}
