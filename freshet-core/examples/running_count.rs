//! The smallest possible Freshet program: count words from an iterator and
//! print the full count table on every fired batch.
use std::time::Duration;

use freshet::operators::{Count, ForEachBatch, KeyBy};
use freshet::runtime::{MicroBatchRuntime, StreamProvider};
use freshet::sinks::{render_table, BatchSink, DEFAULT_MAX_ROWS};
use freshet::sources::IteratorSource;
use freshet::types::BatchMeta;

struct PrintSink;

impl BatchSink<String> for PrintSink {
    fn on_batch(&mut self, meta: BatchMeta, rows: &[(String, u64)]) {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|(word, count)| vec![word.clone(), count.to_string()])
            .collect();
        println!("batch {}", meta.batch_id);
        print!(
            "{}",
            render_table(&["word", "count"], &cells, DEFAULT_MAX_ROWS)
        );
    }
}

fn main() {
    tracing_subscriber::fmt().init();
    let words = ["apple", "banana", "apple", "cherry", "banana", "apple"];

    let runtime = MicroBatchRuntime::builder()
        .trigger(Duration::ZERO)
        .build(|provider: &mut dyn StreamProvider| {
            provider
                .new_stream()
                .source("words", IteratorSource::new(words))
                .key_by("by-word", |word: &&str| (*word).to_owned())
                .count("word-count")
                .for_each_batch("print", PrintSink);
        });
    runtime.execute().unwrap();
}
