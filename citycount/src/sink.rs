//! Console sink printing the per-city counts of every micro-batch

use std::io::{self, Write};

use freshet::errorhandling::FreshetFatal;
use freshet::sinks::{render_table, BatchSink, DEFAULT_MAX_ROWS};
use freshet::types::BatchMeta;

/// Prints the per-city count table for every fired batch.
///
/// A batch whose result set is empty produces no output at all. Otherwise
/// the sink prints a header with the batch id, the count table and a footer.
/// A null city is rendered as `null`.
pub struct CityCountSink<W> {
    out: W,
}

impl CityCountSink<io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> CityCountSink<W> {
    /// Sink writing to an arbitrary writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_batch(&mut self, meta: BatchMeta, rows: &[(Option<String>, u64)]) -> io::Result<()> {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|(city, count)| {
                vec![
                    city.clone().unwrap_or_else(|| "null".to_owned()),
                    count.to_string(),
                ]
            })
            .collect();
        writeln!(
            self.out,
            "----- Batch: {} - Customer Counts by City -----",
            meta.batch_id
        )?;
        self.out
            .write_all(render_table(&["city", "count"], &cells, DEFAULT_MAX_ROWS).as_bytes())?;
        writeln!(self.out, "----- Batch: {} - End -----", meta.batch_id)?;
        self.out.flush()
    }
}

impl<W: Write + 'static> BatchSink<Option<String>> for CityCountSink<W> {
    fn on_batch(&mut self, meta: BatchMeta, rows: &[(Option<String>, u64)]) {
        if rows.is_empty() {
            return;
        }
        // a console we cannot write to leaves nowhere to report results,
        // so the job aborts
        self.write_batch(meta, rows).freshet_fatal();
    }
}
