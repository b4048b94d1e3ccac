use std::time::Duration;

use crate::runtime::{MicroBatchRuntime, StreamProvider};

/// Creates a runtime with a zero trigger interval, so jobs over bounded
/// sources complete without sleeping between batches
pub(crate) fn get_test_rt<F>(build: F) -> MicroBatchRuntime<F>
where
    F: FnOnce(&mut dyn StreamProvider),
{
    MicroBatchRuntime::builder()
        .trigger(Duration::ZERO)
        .build(build)
}
