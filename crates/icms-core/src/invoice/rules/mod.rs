//! Rule-based line extractors for utility invoices.

pub mod amounts;
pub mod category;
pub mod patterns;

pub use amounts::{parse_localized_amount, parse_localized_literal};
pub use category::{classify_line, Classification};
pub use patterns::*;
