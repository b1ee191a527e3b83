//! Invoice section scanning and line extraction.

mod parser;
pub mod rules;
pub mod section;
pub mod validator;

pub use parser::{FaturaParser, InvoiceParser, ParsedFatura};
pub use section::{SectionExtractor, SectionState};
pub use validator::Validator;

use crate::error::DocumentError;

/// Result type for per-document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
