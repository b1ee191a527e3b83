//! Delimited ICMS report and summary bookkeeping for a batch run.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::{DocumentFailure, IcmsError, Result};
use crate::models::IcmsResult;

use super::summary::BatchSummary;

/// Column titles of the report.
pub const REPORT_HEADER: [&str; 4] = ["DATA", "ICMS ORIGINAL", "ICMS REDUZIDO", "DIFERENÇA"];

/// Writes one report row per successful document and collects the
/// summary buckets.
///
/// Every record ends with the delimiter. Write failures are returned as
/// [`IcmsError`] and are not recorded in the summary.
pub struct BatchReporter<W: Write> {
    writer: csv::Writer<W>,
    summary: BatchSummary,
}

impl BatchReporter<File> {
    /// Create (or truncate) the report at `path` and write the header.
    pub fn create(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::create(path)?;
        debug!("Writing ICMS header to {}", path.display());
        Self::new(file, delimiter)
    }
}

impl<W: Write> BatchReporter<W> {
    /// Wrap `inner` and write the header.
    pub fn new(inner: W, delimiter: u8) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(inner);

        let mut reporter = Self {
            writer,
            summary: BatchSummary::new(),
        };
        reporter.write_row(REPORT_HEADER)?;
        Ok(reporter)
    }

    fn write_row<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        // Empty trailing field so the row ends with the delimiter
        let fields = fields
            .into_iter()
            .map(|f| f.as_ref().to_vec())
            .chain(std::iter::once(Vec::new()));
        self.writer.write_record(fields)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Record the number of documents about to be processed.
    pub fn begin(&mut self, count: usize) {
        self.info(format!("{} arquivos a processar", count));
    }

    /// Add an informational entry.
    pub fn info(&mut self, message: impl Into<String>) {
        self.summary.info.push(message.into());
    }

    /// Record the outcome of one document.
    pub fn record(&mut self, outcome: &std::result::Result<IcmsResult, DocumentFailure>) -> Result<()> {
        match outcome {
            Ok(result) => self.record_success(result),
            Err(failure) => {
                self.record_failure(failure);
                Ok(())
            }
        }
    }

    /// Append the row of `result` and list it as a success.
    pub fn record_success(&mut self, result: &IcmsResult) -> Result<()> {
        self.write_row(result.to_record())?;
        debug!("  Written ICMS values for {}", result.document_id);
        self.summary.success.push(result.document_id.clone());
        Ok(())
    }

    /// List `failure` in the error bucket. No row is written.
    pub fn record_failure(&mut self, failure: &DocumentFailure) {
        self.summary.errors.push(failure.summary_entry());
    }

    /// Flush the report and return the summary with the underlying writer.
    pub fn into_parts(self) -> Result<(BatchSummary, W)> {
        let inner = self
            .writer
            .into_inner()
            .map_err(|e| IcmsError::Io(e.into_error()))?;
        Ok((self.summary, inner))
    }

    /// Flush the report and return the summary.
    pub fn finish(self) -> Result<BatchSummary> {
        self.into_parts().map(|(summary, _)| summary)
    }
}
