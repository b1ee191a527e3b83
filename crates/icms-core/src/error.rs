//! Error types for the icms-core library.

use std::fmt;

use thiserror::Error;

use crate::models::Category;

/// Main error type for the icms library.
///
/// These errors are not scoped to a single invoice: a batch that hits one
/// of them stops.
#[derive(Error, Debug)]
pub enum IcmsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Failures that abort the processing of a single invoice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A classified line has no `digits,digits` literal.
    #[error("no amount in line: {line:?}")]
    AmountFormat { line: String },

    /// Mandatory categories were not read.
    #[error("incomplete invoice, missing {}", CategoryList(.missing))]
    IncompleteInvoice { missing: Vec<Category> },

    /// The amounts of the invoice do not fit the decimal range.
    #[error("amounts out of range")]
    AmountOverflow,

    /// The begin marker never appeared in the text.
    #[error("invoice section not found")]
    SectionNotFound,

    /// The text of the document could not be obtained.
    #[error("unreadable document: {0}")]
    Unreadable(String),
}

struct CategoryList<'a>(&'a [Category]);

impl fmt::Display for CategoryList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, category) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", category)?;
        }
        Ok(())
    }
}

/// A document error together with the context needed to diagnose it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{document_id}: {error}")]
pub struct DocumentFailure {
    /// Identifier of the failed document.
    pub document_id: String,

    /// What went wrong.
    pub error: DocumentError,

    /// Last line that was being processed, if any.
    pub last_line: Option<String>,
}

impl DocumentFailure {
    pub fn new(document_id: impl Into<String>, error: DocumentError) -> Self {
        Self {
            document_id: document_id.into(),
            error,
            last_line: None,
        }
    }

    pub fn with_last_line(mut self, line: impl Into<String>) -> Self {
        self.last_line = Some(line.into());
        self
    }

    /// Entry written to the error bucket of the batch summary.
    pub fn summary_entry(&self) -> String {
        match &self.last_line {
            Some(line) => format!("{} ({}; last line: {:?})", self.document_id, self.error, line),
            None => format!("{} ({})", self.document_id, self.error),
        }
    }
}

/// Result type for the icms library.
pub type Result<T> = std::result::Result<T, IcmsError>;
