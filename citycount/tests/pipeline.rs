//! End-to-end pipeline tests: JSON payloads in, printed batches out

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use citycount::build_dataflow;
use citycount::sink::CityCountSink;
use freshet::runtime::{MicroBatchRuntime, StreamProvider};
use freshet::sources::IteratorSource;
use freshet_kafka::KafkaRecord;

/// Writer which keeps a readable handle on the output after the sink moved
/// into the pipeline
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn into_string(self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn record(json: &str) -> KafkaRecord {
    KafkaRecord::builder()
        .topic("customer_topic")
        .payload(json.as_bytes().to_vec())
        .build()
}

#[test]
fn counts_customers_per_city() {
    let buf = SharedBuf::default();
    let sink = CityCountSink::new(buf.clone());
    let records = vec![
        record(r#"{"customer_id":1,"name":"Ada","city":"Berlin","order_count":3,"registration_timestamp":1700000000}"#),
        record(r#"{"customer_id":2,"name":"Grace","city":"Amsterdam","order_count":1,"registration_timestamp":1700000100}"#),
        record(r#"{"customer_id":3,"name":"Linus","city":"Berlin","order_count":7,"registration_timestamp":1700000200}"#),
        record("not json at all"),
    ];

    let runtime = MicroBatchRuntime::builder()
        .trigger(Duration::ZERO)
        .build(move |provider: &mut dyn StreamProvider| {
            build_dataflow(provider, IteratorSource::new(records), sink);
        });
    runtime.execute().unwrap();

    let expected = "\
----- Batch: 0 - Customer Counts by City -----
+---------+-----+
|     city|count|
+---------+-----+
|     null|    1|
|Amsterdam|    1|
|   Berlin|    2|
+---------+-----+
----- Batch: 0 - End -----
";
    assert_eq!(buf.into_string(), expected);
}

#[test]
fn counts_accumulate_across_batches() {
    let buf = SharedBuf::default();
    let sink = CityCountSink::new(buf.clone());
    let records = vec![
        record(r#"{"customer_id":1,"city":"Berlin"}"#),
        record(r#"{"customer_id":2,"city":"Berlin"}"#),
        record(r#"{"customer_id":3,"city":"Oslo"}"#),
    ];

    let runtime = MicroBatchRuntime::builder()
        .trigger(Duration::ZERO)
        .max_batch_records(2)
        .build(move |provider: &mut dyn StreamProvider| {
            build_dataflow(provider, IteratorSource::new(records), sink);
        });
    runtime.execute().unwrap();

    let expected = "\
----- Batch: 0 - Customer Counts by City -----
+------+-----+
|  city|count|
+------+-----+
|Berlin|    2|
+------+-----+
----- Batch: 0 - End -----
----- Batch: 1 - Customer Counts by City -----
+------+-----+
|  city|count|
+------+-----+
|Berlin|    2|
|  Oslo|    1|
+------+-----+
----- Batch: 1 - End -----
";
    assert_eq!(buf.into_string(), expected);
}

#[test]
fn empty_stream_prints_nothing() {
    let buf = SharedBuf::default();
    let sink = CityCountSink::new(buf.clone());

    let runtime = MicroBatchRuntime::builder()
        .trigger(Duration::ZERO)
        .build(move |provider: &mut dyn StreamProvider| {
            build_dataflow(
                provider,
                IteratorSource::new(Vec::<KafkaRecord>::new()),
                sink,
            );
        });
    runtime.execute().unwrap();

    assert!(buf.into_string().is_empty());
}
