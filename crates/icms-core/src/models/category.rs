//! Cost categories found in the itemized block of a utility invoice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed cost categories that make up the ICMS base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Energy consumed (energia).
    Energy,
    /// Transmission network usage (transmissão).
    Transmission,
    /// Distribution network usage (distribuição).
    Distribution,
    /// Sector charges (encargos setoriais).
    SectorCharges,
    /// Taxes other than ICMS (tributos).
    Taxes,
    /// Technical and commercial losses (perdas).
    Losses,
    /// Everything else (outros).
    Other,
}

impl Category {
    /// All categories, in classification priority order.
    pub const ALL: [Category; 7] = [
        Category::Energy,
        Category::Transmission,
        Category::Distribution,
        Category::SectorCharges,
        Category::Taxes,
        Category::Losses,
        Category::Other,
    ];

    /// Categories that must be read before the tax can be computed.
    pub const MANDATORY: [Category; 5] = [
        Category::Energy,
        Category::Transmission,
        Category::Distribution,
        Category::SectorCharges,
        Category::Taxes,
    ];

    /// Whether the category is part of the mandatory set.
    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }

    /// Whether the category stays in the reduced ICMS base.
    pub fn in_reduced_base(self) -> bool {
        !matches!(
            self,
            Category::Transmission | Category::Distribution | Category::SectorCharges
        )
    }

    /// Label used in logs and reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Energy => "ENERGIA",
            Category::Transmission => "TRANSMISSAO",
            Category::Distribution => "DISTRIBUICAO",
            Category::SectorCharges => "ENCARGOS",
            Category::Taxes => "TRIBUTOS",
            Category::Losses => "PERDAS",
            Category::Other => "OUTROS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
