use freshet::operators::{Count, ForEachBatch, KeyBy, Map};
use freshet::runtime::StreamProvider;
use freshet::sinks::BatchSink;
use freshet::sources::SourceImpl;
use freshet::types::OutputMode;
use freshet_kafka::KafkaRecord;

use crate::schema::Customer;

/// Wire the customer pipeline:
/// source -> JSON decode -> group by city -> running count -> batch sink.
///
/// The aggregation runs in complete mode, so every fired batch hands the
/// sink the full up-to-date per-city table ordered by city name, with the
/// null city group first.
pub fn build_dataflow<S>(
    provider: &mut dyn StreamProvider,
    source: S,
    sink: impl BatchSink<Option<String>>,
) where
    S: SourceImpl<KafkaRecord>,
{
    provider
        .new_stream()
        .source("customer-events", source)
        .map("decode-json", |record: KafkaRecord| {
            Customer::decode(&record.payload)
        })
        .key_by("by-city", |customer| customer.city.clone())
        .count("city-count")
        .output_mode(OutputMode::Complete)
        .for_each_batch("console", sink);
}
