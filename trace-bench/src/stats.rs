// CSV reporting for replay sweeps

use crate::error::Result;
use crate::models::RunResult;
use std::io::Write;

/// Streams sweep results as CSV: run-result columns followed by container
/// stats columns.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: usize,
}

impl<W: Write> ReportWriter<W> {
    /// Writes the header row immediately.
    pub fn new(out: W, stats_header: &[&str]) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(RunResult::CSV_HEADER.iter().chain(stats_header))?;
        Ok(Self {
            writer,
            columns: RunResult::CSV_HEADER.len() + stats_header.len(),
        })
    }

    /// Number of columns in every row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn write_row(&mut self, result: &RunResult, stats: &[String]) -> Result<()> {
        let fields = result.csv_fields();
        self.writer
            .write_record(fields.iter().chain(stats.iter()))?;
        // keep rows visible as they are produced
        self.writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()).into())
    }
}

/// The full header line, as [`ReportWriter`] writes it, for a given stats header.
pub fn csv_header(stats_header: &[&str]) -> String {
    format!(
        "{},{}",
        RunResult::CSV_HEADER.join(","),
        stats_header.join(",")
    )
}
