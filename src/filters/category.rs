//! Exact category filter.

use super::Filter;
use crate::catalogue::{CategorySelection, Product};

/// Keeps products whose category equals the selection exactly.
pub struct CategoryFilter {
    selection: CategorySelection,
}

impl CategoryFilter {
    pub fn new(selection: CategorySelection) -> Self {
        Self { selection }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        self.selection.includes(product)
    }

    fn description(&self) -> String {
        format!("Category: {}", self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(category: &str) -> Product {
        Product {
            id: "TEST".to_string(),
            name: "Test".to_string(),
            category: category.to_string(),
            fabric: None,
            description: String::new(),
            original_price: 1000,
            discount_price: 1000,
            discount_percent: 0,
            images: vec!["https://img.example/1.jpg".to_string()],
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            trending: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_category_filter() {
        let filter = CategoryFilter::new(CategorySelection::parse("Sarees"));

        assert!(filter.matches(&make_product("Sarees")));
        assert!(!filter.matches(&make_product("Kurti")));
    }

    #[test]
    fn test_no_partial_or_case_folding() {
        let filter = CategoryFilter::new(CategorySelection::parse("Sarees"));

        assert!(!filter.matches(&make_product("SAREES")));
        assert!(!filter.matches(&make_product("Ready to Wear Sarees")));
    }

    #[test]
    fn test_all_matches_everything() {
        let filter = CategoryFilter::new(CategorySelection::all());
        assert!(filter.matches(&make_product("Sarees")));
        assert!(filter.matches(&make_product("")));
    }

    #[test]
    fn test_description() {
        let filter = CategoryFilter::new(CategorySelection::parse("Blouses"));
        assert_eq!(filter.description(), "Category: Blouses");
    }
}
