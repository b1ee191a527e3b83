//! Localized amount parsing (comma as decimal separator).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::DocumentError;

use super::patterns::AMOUNT_LITERAL;

/// Parse the first `digits,digits` literal of a line as an exact decimal.
///
/// Fails with [`DocumentError::AmountFormat`] when the line holds no such
/// literal, or when the literal cannot be held exactly by a decimal.
pub fn parse_localized_amount(line: &str) -> Result<Decimal, DocumentError> {
    AMOUNT_LITERAL
        .find(line)
        .and_then(|m| parse_localized_literal(m.as_str()))
        .ok_or_else(|| DocumentError::AmountFormat {
            line: line.to_string(),
        })
}

/// Convert a bare `123,45` literal to a decimal.
///
/// Returns `None` when the value would be rounded, so every fractional
/// digit of the literal must survive.
pub fn parse_localized_literal(literal: &str) -> Option<Decimal> {
    let fraction_digits = literal.rsplit_once(',').map_or(0, |(_, f)| f.len());
    Decimal::from_str(&literal.replace(',', "."))
        .ok()
        .filter(|amount| amount.scale() as usize == fraction_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_localized_amount() {
        assert_eq!(
            parse_localized_amount("Energia 123,45 kWh"),
            Ok(Decimal::from_str("123.45").unwrap())
        );
        assert_eq!(
            parse_localized_amount("Tributos R$ 3,00"),
            Ok(Decimal::from_str("3.00").unwrap())
        );
    }

    #[test]
    fn test_first_literal_wins() {
        assert_eq!(
            parse_localized_amount("Energia 150 kWh 0,65 97,50"),
            Ok(Decimal::from_str("0.65").unwrap())
        );
    }

    #[test]
    fn test_thousands_separator_is_not_understood() {
        assert_eq!(
            parse_localized_amount("Energia 1.234,56"),
            Ok(Decimal::from_str("234.56").unwrap())
        );
    }

    #[test]
    fn test_missing_comma_fails() {
        assert_eq!(
            parse_localized_amount("Energia 123.45"),
            Err(DocumentError::AmountFormat {
                line: "Energia 123.45".to_string()
            })
        );
        assert!(parse_localized_amount("Energia").is_err());
        assert!(parse_localized_amount("Energia 12, 5").is_err());
    }

    #[test]
    fn test_inexact_literal_fails() {
        let line = "Energia 1,00000000000000000000000000000001";
        assert_eq!(
            parse_localized_amount(line),
            Err(DocumentError::AmountFormat {
                line: line.to_string()
            })
        );
        assert!(parse_localized_amount("Energia 50000000000000000000000000000,00").is_err());
        assert!(parse_localized_amount("Energia 99999999999999999999999999999999,0").is_err());
    }

    #[test]
    fn test_largest_exact_literals() {
        assert_eq!(
            parse_localized_literal("0,1234567890123456789012345678"),
            Some(Decimal::from_str("0.1234567890123456789012345678").unwrap())
        );
        assert_eq!(
            parse_localized_literal("7000000000000000000000000000,0"),
            Some(Decimal::from_str("7000000000000000000000000000.0").unwrap())
        );
    }
}
