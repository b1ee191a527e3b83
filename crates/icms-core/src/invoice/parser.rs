//! Invoice text parser producing the ICMS comparison for one document.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DocumentError, DocumentFailure};
use crate::models::config::IcmsConfig;
use crate::models::{CategoryValues, IcmsResult, MandatoryPolicy};
use crate::tax::IcmsCalculator;

use super::rules::{classify_line, parse_localized_amount, Classification};
use super::section::SectionExtractor;
use super::validator::Validator;
use super::Result;

/// Category breakdown and tax figures of one invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFatura {
    /// Amounts read from the itemized section.
    pub values: CategoryValues,
    /// ICMS on both bases.
    pub result: IcmsResult,
    /// Whether the end marker was reached.
    pub section_closed: bool,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse the text of one document.
    fn parse(&self, document_id: &str, text: &str) -> std::result::Result<ParsedFatura, DocumentFailure>;
}

/// Parser for the itemized block of a utility invoice ("fatura").
#[derive(Debug, Clone)]
pub struct FaturaParser {
    section: SectionExtractor,
    validator: Validator,
    calculator: IcmsCalculator,
}

impl FaturaParser {
    /// Create a parser with the given section markers and default settings.
    pub fn new(begin_marker: &str, end_marker: &str) -> Self {
        Self {
            section: SectionExtractor::new(begin_marker, end_marker),
            validator: Validator::default(),
            calculator: IcmsCalculator::default(),
        }
    }

    /// Create a parser from the pipeline configuration.
    pub fn from_config(config: &IcmsConfig) -> Self {
        Self::new(&config.extraction.begin_marker, &config.extraction.end_marker)
            .with_mandatory_policy(config.extraction.mandatory_policy)
            .with_calculator(IcmsCalculator::new(config.tax.icms_rate))
    }

    /// Set the mandatory category policy.
    pub fn with_mandatory_policy(mut self, policy: MandatoryPolicy) -> Self {
        self.validator = Validator::new(policy);
        self
    }

    /// Set the tax calculator.
    pub fn with_calculator(mut self, calculator: IcmsCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Classify one section line and record its amount.
    ///
    /// Lines without a category keyword leave `values` untouched. A
    /// classified line without an amount fails the document.
    pub fn read_line(&self, values: CategoryValues, line: &str) -> Result<CategoryValues> {
        match classify_line(line) {
            Classification::NoMatch => Ok(values),
            Classification::Matched(category) => {
                let amount = parse_localized_amount(line)?;
                debug!("  {}={}", category, amount);
                Ok(values.with(category, amount))
            }
        }
    }

    /// Scan `text` and return the amounts of the itemized section and
    /// whether the end marker was reached.
    fn scan(
        &self,
        document_id: &str,
        text: &str,
    ) -> std::result::Result<(CategoryValues, bool), DocumentFailure> {
        let mut section = self.section.clone();
        section.reset();

        let mut values = CategoryValues::new();
        let mut last_line = None;

        for line in text.lines().map(str::trim_end) {
            if !section.feed(line) {
                if section.is_done() {
                    break;
                }
                continue;
            }

            last_line = Some(line);
            values = self
                .read_line(values, line)
                .map_err(|e| DocumentFailure::new(document_id, e).with_last_line(line))?;
        }

        if !section.saw_begin() {
            return Err(DocumentFailure::new(document_id, DocumentError::SectionNotFound));
        }

        if let Err(e) = self.validator.validate(&values) {
            let failure = DocumentFailure::new(document_id, e);
            return Err(match last_line {
                Some(line) => failure.with_last_line(line),
                None => failure,
            });
        }

        Ok((values, section.is_done()))
    }
}

impl Default for FaturaParser {
    fn default() -> Self {
        Self::from_config(&IcmsConfig::default())
    }
}

impl InvoiceParser for FaturaParser {
    fn parse(&self, document_id: &str, text: &str) -> std::result::Result<ParsedFatura, DocumentFailure> {
        info!("Calculating ICMS for {}", document_id);

        let (values, section_closed) = self.scan(document_id, text).inspect_err(|failure| {
            warn!(
                "Error parsing {} at line {:?}: {}",
                document_id,
                failure.last_line.as_deref().unwrap_or(""),
                failure.error
            );
        })?;

        if !section_closed {
            warn!("{}: end marker not found, using the amounts read so far", document_id);
        }

        let result = self
            .calculator
            .compute(document_id, &values)
            .map_err(|e| DocumentFailure::new(document_id, e))
            .inspect_err(|failure| {
                warn!("Error computing ICMS for {}: {}", document_id, failure.error)
            })?;
        debug!(
            "  ICMS original {} reduzido {} diferença {}",
            result.original_tax, result.reduced_tax, result.difference
        );

        Ok(ParsedFatura {
            values,
            result,
            section_closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = r#"
        DISTRIBUIDORA DE ENERGIA S.A.
        Conta de energia elétrica 03/2021
        Composição da Fatura
        Energia 100,00
        Transmissão 10,00
        Distribuição 5,00
        Encargos Setoriais 2,00
        Tributos 3,00
        Consumo faturado 150 kWh
        Outros serviços 99,00
    "#;

    #[test]
    fn test_parse_sample_invoice() {
        let parsed = FaturaParser::default().parse("2021-03", SAMPLE).unwrap();

        assert_eq!(parsed.result.original_tax, dec("36.00"));
        assert_eq!(parsed.result.reduced_tax, dec("30.90"));
        assert_eq!(parsed.result.difference, dec("5.10"));
        assert_eq!(parsed.values.get(Category::Other), Decimal::ZERO);
        assert!(parsed.section_closed);
    }

    #[test]
    fn test_lines_before_section_are_ignored() {
        // "energia" in the header would fail the amount parse if scanned
        let parsed = FaturaParser::default().parse("doc", SAMPLE).unwrap();
        assert_eq!(parsed.values.get(Category::Energy), dec("100.00"));
    }

    #[test]
    fn test_read_line() {
        let parser = FaturaParser::default();

        let values = parser
            .read_line(CategoryValues::new(), "Energia 123,45 kWh")
            .unwrap();
        assert_eq!(values.get(Category::Energy), dec("123.45"));

        let values = parser.read_line(values, "Bandeira verde").unwrap();
        assert_eq!(values.len(), 1);

        let values = parser.read_line(values, "Energia 1,00").unwrap();
        assert_eq!(values.get(Category::Energy), dec("1.00"));
    }

    #[test]
    fn test_missing_begin_marker() {
        let failure = FaturaParser::default()
            .parse("sem-secao", "Energia 100,00\nTributos 3,00\n")
            .unwrap_err();

        assert_eq!(failure.document_id, "sem-secao");
        assert_eq!(failure.error, DocumentError::SectionNotFound);
    }

    #[test]
    fn test_malformed_amount_fails_document() {
        let text = "Composição da Fatura\nEnergia 100,00\nTributos R$ 3\nkWh";
        let failure = FaturaParser::default().parse("ruim", text).unwrap_err();

        assert_eq!(
            failure.error,
            DocumentError::AmountFormat {
                line: "Tributos R$ 3".to_string()
            }
        );
        assert_eq!(failure.last_line.as_deref(), Some("Tributos R$ 3"));
    }

    #[test]
    fn test_empty_section_is_incomplete() {
        let text = "Composição da Fatura\nBandeira verde\nConsumo 150 kWh";
        let failure = FaturaParser::default().parse("vazia", text).unwrap_err();

        assert!(matches!(failure.error, DocumentError::IncompleteInvoice { .. }));
        assert_eq!(failure.last_line.as_deref(), Some("Consumo 150 kWh"));
    }

    #[test]
    fn test_unterminated_section_uses_amounts_read() {
        let text = "Composição da Fatura\nEnergia 100,00\nTributos 3,00";
        let parsed = FaturaParser::default().parse("aberta", text).unwrap();

        assert!(!parsed.section_closed);
        assert_eq!(parsed.result.original_tax, dec("30.90"));
        assert_eq!(parsed.result.difference, Decimal::ZERO);
    }

    #[test]
    fn test_all_present_policy() {
        let text = "Composição da Fatura\nEnergia 100,00\nkWh";
        let parser = FaturaParser::default().with_mandatory_policy(MandatoryPolicy::AllPresent);

        assert!(parser.parse("parcial", text).is_err());
        assert!(FaturaParser::default().parse("parcial", text).is_ok());
    }

    #[test]
    fn test_tax_overflow_fails_document() {
        let text = "Composição da Fatura\nEnergia 7000000000000000000000000000,0\nkWh";
        let parser = FaturaParser::default().with_calculator(IcmsCalculator::new(Decimal::from(1000)));

        let failure = parser.parse("enorme", text).unwrap_err();
        assert_eq!(failure.document_id, "enorme");
        assert_eq!(failure.error, DocumentError::AmountOverflow);
    }

    #[test]
    fn test_parser_keeps_no_state_between_documents() {
        let parser = FaturaParser::default();
        parser.parse("a", SAMPLE).unwrap();

        let failure = parser.parse("b", "nada aqui").unwrap_err();
        assert_eq!(failure.error, DocumentError::SectionNotFound);
    }
}
