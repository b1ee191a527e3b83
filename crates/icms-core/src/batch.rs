//! Sequential batch driver.

use std::io::Write;

use tracing::info;

use crate::error::{DocumentFailure, Result};
use crate::invoice::InvoiceParser;
use crate::report::BatchReporter;

/// Extracted text of one invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceText {
    /// Identifier used in the report row.
    pub document_id: String,
    /// Text lines of the invoice.
    pub text: String,
}

impl InvoiceText {
    pub fn new(document_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            text: text.into(),
        }
    }
}

/// Process `documents` in order, one report row per success.
///
/// A document that could not be loaded or parsed is listed in the error
/// bucket and the batch moves on. Report write failures stop the batch.
pub fn run_batch<P, W, I>(parser: &P, reporter: &mut BatchReporter<W>, documents: I) -> Result<()>
where
    P: InvoiceParser + ?Sized,
    W: Write,
    I: IntoIterator<Item = std::result::Result<InvoiceText, DocumentFailure>>,
    I::IntoIter: ExactSizeIterator,
{
    let documents = documents.into_iter();
    reporter.begin(documents.len());

    for document in documents {
        let outcome = document.and_then(|doc| {
            parser
                .parse(&doc.document_id, &doc.text)
                .map(|parsed| parsed.result)
        });

        if let Ok(result) = &outcome {
            info!(
                "{}: ICMS original {} reduzido {} diferença {}",
                result.document_id, result.original_tax, result.reduced_tax, result.difference
            );
        }

        reporter.record(&outcome)?;
    }

    Ok(())
}
