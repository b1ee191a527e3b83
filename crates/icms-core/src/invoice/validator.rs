//! Mandatory category check performed before the tax is computed.

use crate::error::DocumentError;
use crate::models::{Category, CategoryValues, MandatoryPolicy};

/// Confirms the mandatory categories were read.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: MandatoryPolicy,
}

impl Validator {
    pub fn new(policy: MandatoryPolicy) -> Self {
        Self { policy }
    }

    /// Mandatory categories that are absent or zero.
    fn missing(values: &CategoryValues) -> Vec<Category> {
        Category::MANDATORY
            .into_iter()
            .filter(|c| values.get(*c).is_zero())
            .collect()
    }

    pub fn validate(&self, values: &CategoryValues) -> Result<(), DocumentError> {
        let missing = Self::missing(values);

        let incomplete = match self.policy {
            MandatoryPolicy::AnyPresent => missing.len() == Category::MANDATORY.len(),
            MandatoryPolicy::AllPresent => !missing.is_empty(),
        };

        if incomplete {
            Err(DocumentError::IncompleteInvoice { missing })
        } else {
            Ok(())
        }
    }
}
