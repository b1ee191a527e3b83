//! Core library for auditing the ICMS charged on utility invoices.
//!
//! This crate provides:
//! - Scanning of the itemized block ("Composição da Fatura") of extracted invoice text
//! - Classification of cost lines and parsing of comma-decimal amounts
//! - ICMS on the full and on the reduced cost base, and their difference
//! - Batch reporting (semicolon-delimited rows plus a run summary)
//! - PDF text extraction (feature `pdf`)

pub mod batch;
pub mod error;
pub mod invoice;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod report;
pub mod tax;
pub mod text;

pub use batch::{run_batch, InvoiceText};
pub use error::{DocumentError, DocumentFailure, IcmsError, PdfError, Result};
pub use invoice::{FaturaParser, InvoiceParser, ParsedFatura, SectionExtractor, SectionState};
pub use invoice::rules::{classify_line, parse_localized_amount, Classification};
pub use models::{Category, CategoryValues, IcmsConfig, IcmsResult, MandatoryPolicy};
#[cfg(feature = "pdf")]
pub use pdf::{PdfProcessor, PdfTextExtractor};
pub use report::{BatchReporter, BatchSummary};
pub use tax::{IcmsCalculator, ICMS_RATE};
