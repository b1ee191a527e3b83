//! Line classification into cost categories.

use crate::models::Category;

use super::patterns::CATEGORY_PATTERNS;

/// Outcome of classifying one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No category keyword in the line.
    NoMatch,
    /// The highest-priority category whose keyword occurs in the line.
    Matched(Category),
}

/// Classify a line by testing category keywords in priority order.
///
/// Only the first matching category is reported; lower-priority
/// categories are not tested.
pub fn classify_line(line: &str) -> Classification {
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(category, _)| Classification::Matched(*category))
        .unwrap_or(Classification::NoMatch)
}
