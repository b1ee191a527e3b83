//! Batch reporting: delimited output rows and the run summary.

mod summary;
mod writer;

pub use summary::BatchSummary;
pub use writer::{BatchReporter, REPORT_HEADER};
