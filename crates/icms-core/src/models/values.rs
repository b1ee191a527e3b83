//! Per-document accumulator of category amounts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Amounts read for each category of a single invoice.
///
/// A fresh value is built for every document. Categories that were never
/// recorded read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryValues {
    values: BTreeMap<Category, Decimal>,
}

impl CategoryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount recorded for `category`, or zero.
    pub fn get(&self, category: Category) -> Decimal {
        self.values.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Whether an amount was recorded for `category`.
    pub fn contains(&self, category: Category) -> bool {
        self.values.contains_key(&category)
    }

    /// Record `amount` for `category`, replacing any earlier amount.
    pub fn with(mut self, category: Category, amount: Decimal) -> Self {
        self.values.insert(category, amount);
        self
    }

    /// Sum of the amounts of the given categories, or `None` on overflow.
    pub fn sum_of<I>(&self, categories: I) -> Option<Decimal>
    where
        I: IntoIterator<Item = Category>,
    {
        categories
            .into_iter()
            .try_fold(Decimal::ZERO, |sum, c| sum.checked_add(self.get(c)))
    }

    /// Recorded amounts in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.values.iter().map(|(c, v)| (*c, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl FromIterator<(Category, Decimal)> for CategoryValues {
    fn from_iter<T: IntoIterator<Item = (Category, Decimal)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |values, (c, v)| values.with(c, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_missing_category_reads_zero() {
        let values = CategoryValues::new();
        assert_eq!(values.get(Category::Losses), Decimal::ZERO);
        assert!(!values.contains(Category::Losses));
        assert!(values.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let values = CategoryValues::new()
            .with(Category::Energy, Decimal::from_str("10.00").unwrap())
            .with(Category::Energy, Decimal::from_str("12.50").unwrap());

        assert_eq!(values.get(Category::Energy), Decimal::from_str("12.50").unwrap());
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_sum_of() {
        let values: CategoryValues = [
            (Category::Energy, Decimal::from(100)),
            (Category::Taxes, Decimal::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(values.sum_of(Category::ALL), Some(Decimal::from(103)));
        assert_eq!(
            values.sum_of([Category::Transmission, Category::Distribution]),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_sum_of_overflow() {
        let values = CategoryValues::new()
            .with(Category::Energy, Decimal::MAX)
            .with(Category::Losses, Decimal::ONE);

        assert_eq!(values.sum_of(Category::ALL), None);
        assert_eq!(values.sum_of([Category::Energy]), Some(Decimal::MAX));
    }
}
