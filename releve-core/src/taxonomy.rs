//! Two-level budget taxonomy: category names mapped to their allowed
//! sub-categories.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Suffix of the synthesized default sub-category every category gets.
pub const DEFAULT_SUB_SUFFIX: &str = " - Autre";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<String>,
    subs: HashMap<String, Vec<String>>,
}

impl Taxonomy {
    /// Build the taxonomy from the flat category list and the
    /// (category, sub-category description) detail rows.
    ///
    /// Each category's list starts with a synthesized `<category> - Autre`
    /// entry followed by the distinct detail descriptions in first-seen
    /// order, so a category with no detail rows still has one selectable
    /// sub-category.
    pub fn resolve<I, S>(categories: I, details: &[(String, String)]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for category in categories {
            let category = category.into();
            if !ordered.contains(&category) {
                ordered.push(category);
            }
        }

        let mut subs = HashMap::with_capacity(ordered.len());
        for category in &ordered {
            let mut list = vec![format!("{category}{DEFAULT_SUB_SUFFIX}")];
            for (detail_category, description) in details {
                if detail_category == category && !list.contains(description) {
                    list.push(description.clone());
                }
            }
            subs.insert(category.clone(), list);
        }

        Self {
            categories: ordered,
            subs,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn contains(&self, category: &str) -> bool {
        self.subs.contains_key(category)
    }

    /// Allowed sub-categories for a category; empty for an unknown one.
    pub fn sub_categories(&self, category: &str) -> &[String] {
        self.subs.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn allows(&self, category: &str, sub_category: &str) -> bool {
        self.sub_categories(category)
            .iter()
            .any(|s| s == sub_category)
    }
}
