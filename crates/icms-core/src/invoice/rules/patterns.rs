//! Common regex patterns for utility invoice scanning.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::models::Category;

/// Keywords tested against each line, in priority order.
///
/// Accented spellings share the slot of their unaccented form.
pub const CATEGORY_KEYWORDS: [(Category, &[&str]); 7] = [
    (Category::Energy, &["energia"]),
    (Category::Transmission, &["transmissao", "transmissão"]),
    (Category::Distribution, &["distribuicao", "distribuição"]),
    (Category::SectorCharges, &["setoriais"]),
    (Category::Taxes, &["tributos"]),
    (Category::Losses, &["perdas"]),
    (Category::Other, &["outros"]),
];

lazy_static! {
    // Localized decimal literal: 123,45
    pub static ref AMOUNT_LITERAL: Regex = Regex::new(r"(\d+),(\d+)").unwrap();

    pub static ref CATEGORY_PATTERNS: Vec<(Category, Regex)> = CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| (*category, literal_pattern(keywords)))
        .collect();
}

/// Case-insensitive pattern matching any of `literals` as a plain substring.
pub fn literal_pattern(literals: &[&str]) -> Regex {
    let alternation = literals
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");

    // Escaped literals always form a valid pattern.
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_is_case_insensitive() {
        let pattern = literal_pattern(&["Composição da Fatura"]);
        assert!(pattern.is_match("  COMPOSIÇÃO DA FATURA  "));
        assert!(!pattern.is_match("Composicao da Fatura"));
    }

    #[test]
    fn test_literal_pattern_escapes_metacharacters() {
        let pattern = literal_pattern(&["R$ (total)"]);
        assert!(pattern.is_match("valor r$ (TOTAL) 10,00"));
        assert!(!pattern.is_match("R total"));
    }

    #[test]
    fn test_amount_literal() {
        let caps = AMOUNT_LITERAL.captures("Energia 1.234,56 kWh").unwrap();
        assert_eq!(&caps[0], "234,56");
    }
}
