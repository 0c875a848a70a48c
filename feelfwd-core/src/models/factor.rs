//! Factor categories produced by factor discovery.

use serde::{Deserialize, Serialize};

/// A group of decision factors under a category, e.g. "Financial".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCategory {
    /// Category name.
    pub category: String,
    /// Factors in this category.
    pub items: Vec<String>,
}

impl FactorCategory {
    /// Creates a category from a name and its items.
    pub fn new<I, S>(category: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the category has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of factors across all categories.
    pub fn count_items(categories: &[FactorCategory]) -> usize {
        categories.iter().map(|c| c.items.len()).sum()
    }

    /// Flattens categories into their factor names, in order.
    pub fn flatten(categories: &[FactorCategory]) -> Vec<&str> {
        categories
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_order() {
        let cats = vec![
            FactorCategory::new("Financial", ["Salary", "Benefits"]),
            FactorCategory::new("Lifestyle", ["Commute"]),
        ];

        assert_eq!(FactorCategory::count_items(&cats), 3);
        assert_eq!(
            FactorCategory::flatten(&cats),
            vec!["Salary", "Benefits", "Commute"]
        );
    }

    #[test]
    fn test_empty_category() {
        let cat = FactorCategory::new("Empty", Vec::<String>::new());
        assert!(cat.is_empty());
    }
}
