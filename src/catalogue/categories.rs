//! The closed category set and category selection.

use super::Product;
use serde::{Deserialize, Serialize};

/// Sentinel label meaning "every category".
pub const ALL_CATEGORIES: &str = "All";

/// Category names offered by the catalogue, in display order.
pub const CATEGORIES: &[&str] = &[
    "Sarees",
    "Kurta Sets",
    "Kurti",
    "Ready to Wear Sarees",
    "Blouses",
    "Lehengas",
    "Palazzos",
    "Indo Western Dress",
    "Dupattas",
];

/// Returns true if the name is one of the known categories.
pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

/// Category part of a query: everything, or one exact category name.
///
/// Only built through `parse`, so a selected name is never a spelling of
/// the sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct CategorySelection {
    name: Option<String>,
}

impl CategorySelection {
    /// Selects every category.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses a category label. The sentinel is matched case-insensitively,
    /// everything else is kept verbatim. Blank input selects everything.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::all()
        } else {
            Self { name: Some(label.to_string()) }
        }
    }

    /// Returns true if this is the "every category" sentinel.
    pub fn is_all(&self) -> bool {
        self.name.is_none()
    }

    /// Returns the selected category name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if the product belongs to this selection.
    pub fn includes(&self, product: &Product) -> bool {
        match &self.name {
            None => true,
            Some(name) => product.category == *name,
        }
    }
}

impl From<String> for CategorySelection {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for CategorySelection {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<CategorySelection> for String {
    fn from(selection: CategorySelection) -> Self {
        selection.to_string()
    }
}

impl std::str::FromStr for CategorySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().unwrap_or(ALL_CATEGORIES))
    }
}

/// Number of products per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Counts products per category.
///
/// Known categories come first in `CATEGORIES` order (including empty ones),
/// followed by any other category names in the order they first appear.
pub fn category_counts(products: &[Product]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = CATEGORIES
        .iter()
        .map(|name| CategoryCount { name: (*name).to_string(), count: 0 })
        .collect();

    for product in products {
        match counts.iter_mut().find(|c| c.name == product.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount { name: product.category.clone(), count: 1 }),
        }
    }

    counts
}
