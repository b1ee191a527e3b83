//! ICMS computation on the full and reduced cost bases.

use rust_decimal::Decimal;

use crate::error::DocumentError;
use crate::models::{Category, CategoryValues, IcmsResult};

/// Default ICMS rate (30%).
pub const ICMS_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Computes the ICMS on both bases.
///
/// Sums and products are exact; each tax figure is rounded to 2 places
/// (half to even) only when the result is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcmsCalculator {
    rate: Decimal,
}

impl IcmsCalculator {
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }

    /// Sum of every category.
    pub fn base_total(values: &CategoryValues) -> Result<Decimal, DocumentError> {
        values
            .sum_of(Category::ALL)
            .ok_or(DocumentError::AmountOverflow)
    }

    /// Sum excluding transmission, distribution and sector charges.
    pub fn base_reduced(values: &CategoryValues) -> Result<Decimal, DocumentError> {
        values
            .sum_of(Category::ALL.into_iter().filter(|c| c.in_reduced_base()))
            .ok_or(DocumentError::AmountOverflow)
    }

    /// Tax on both bases. Fails with [`DocumentError::AmountOverflow`] when a
    /// base or a tax figure leaves the decimal range.
    pub fn compute(
        &self,
        document_id: &str,
        values: &CategoryValues,
    ) -> Result<IcmsResult, DocumentError> {
        let original_tax = self.tax_on(Self::base_total(values)?)?;
        let reduced_tax = self.tax_on(Self::base_reduced(values)?)?;

        Ok(IcmsResult::new(document_id, original_tax, reduced_tax))
    }

    fn tax_on(&self, base: Decimal) -> Result<Decimal, DocumentError> {
        base.checked_mul(self.rate).ok_or(DocumentError::AmountOverflow)
    }
}

impl Default for IcmsCalculator {
    fn default() -> Self {
        Self::new(ICMS_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_values() -> CategoryValues {
        [
            (Category::Energy, dec("100.00")),
            (Category::Transmission, dec("10.00")),
            (Category::Distribution, dec("5.00")),
            (Category::SectorCharges, dec("2.00")),
            (Category::Taxes, dec("3.00")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_rate() {
        assert_eq!(ICMS_RATE, dec("0.30"));
    }

    #[test]
    fn test_compute_sample_invoice() {
        let result = IcmsCalculator::default().compute("2021-03", &sample_values()).unwrap();

        assert_eq!(result.document_id, "2021-03");
        assert_eq!(result.original_tax, dec("36.00"));
        assert_eq!(result.reduced_tax, dec("30.90"));
        assert_eq!(result.difference, dec("5.10"));
    }

    #[test]
    fn test_difference_is_tax_on_excluded_categories() {
        let values = sample_values();
        let result = IcmsCalculator::default().compute("x", &values).unwrap();
        let excluded = values
            .sum_of([
                Category::Transmission,
                Category::Distribution,
                Category::SectorCharges,
            ])
            .unwrap();

        assert_eq!(result.difference, (excluded * ICMS_RATE).round_dp(2));
        assert!(result.original_tax >= result.reduced_tax);
    }

    #[test]
    fn test_losses_and_other_stay_in_both_bases() {
        let values = sample_values()
            .with(Category::Losses, dec("1.10"))
            .with(Category::Other, dec("0.90"));

        assert_eq!(IcmsCalculator::base_total(&values), Ok(dec("122.00")));
        assert_eq!(IcmsCalculator::base_reduced(&values), Ok(dec("105.00")));
    }

    #[test]
    fn test_rounding_happens_once() {
        // 0.35 * 0.30 = 0.105 -> 0.10 (half to even), summed exactly first
        let values: CategoryValues = [
            (Category::Energy, dec("0.35")),
            (Category::Transmission, dec("0.01")),
        ]
        .into_iter()
        .collect();

        let result = IcmsCalculator::default().compute("r", &values).unwrap();
        assert_eq!(result.original_tax, dec("0.11"));
        assert_eq!(result.reduced_tax, dec("0.10"));
        assert_eq!(result.difference, dec("0.01"));
    }

    #[test]
    fn test_difference_when_figures_round_apart() {
        // 0.0084 rounds up, 0.0042 rounds down: the difference is 0.01 even
        // though the tax on the excluded categories rounds to 0.00
        let values: CategoryValues = [
            (Category::Energy, dec("0.014")),
            (Category::Distribution, dec("0.014")),
        ]
        .into_iter()
        .collect();

        let result = IcmsCalculator::default().compute("d", &values).unwrap();
        assert_eq!(result.original_tax, dec("0.01"));
        assert_eq!(result.reduced_tax, dec("0.00"));
        assert_eq!(result.difference, result.original_tax - result.reduced_tax);
        assert_eq!(result.difference, dec("0.01"));

        let excluded_tax = (dec("0.014") * ICMS_RATE).round_dp(2);
        assert_eq!(excluded_tax, dec("0.00"));
        assert_ne!(result.difference, excluded_tax);
    }

    #[test]
    fn test_overflow_is_a_document_error() {
        let values = sample_values().with(Category::Other, Decimal::MAX);
        assert_eq!(
            IcmsCalculator::default().compute("big", &values),
            Err(DocumentError::AmountOverflow)
        );

        // the bases fit, the tax does not
        let values = CategoryValues::new().with(Category::Energy, dec("7000000000000000000000000000.0"));
        assert_eq!(
            IcmsCalculator::new(Decimal::from(1000)).compute("big", &values),
            Err(DocumentError::AmountOverflow)
        );
    }

    #[test]
    fn test_compute_is_pure() {
        let calculator = IcmsCalculator::new(dec("0.18"));
        let values = sample_values();

        assert_eq!(calculator.compute("a", &values), calculator.compute("a", &values));
        assert!(calculator.compute("a", &values).is_ok());
    }
}
