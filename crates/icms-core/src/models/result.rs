//! ICMS comparison result for one invoice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax computed on the full base and on the reduced base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcmsResult {
    /// Identifier of the source document (file stem).
    pub document_id: String,

    /// ICMS on the sum of every category, rounded to 2 places.
    pub original_tax: Decimal,

    /// ICMS on the reduced base, rounded to 2 places.
    pub reduced_tax: Decimal,

    /// `original_tax - reduced_tax`.
    pub difference: Decimal,
}

impl IcmsResult {
    /// Build a result from the two tax figures. Both are rounded to 2
    /// places before the difference is taken.
    pub fn new(document_id: impl Into<String>, original_tax: Decimal, reduced_tax: Decimal) -> Self {
        let original_tax = original_tax.round_dp(2);
        let reduced_tax = reduced_tax.round_dp(2);

        Self {
            document_id: document_id.into(),
            original_tax,
            reduced_tax,
            difference: original_tax - reduced_tax,
        }
    }

    /// Output fields with a dot decimal separator and exactly 2 places.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.document_id.clone(),
            format!("{:.2}", self.original_tax),
            format!("{:.2}", self.reduced_tax),
            format!("{:.2}", self.difference),
        ]
    }
}
