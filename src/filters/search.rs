//! Free-text search over product name and category.

use super::Filter;
use crate::catalogue::Product;

/// Case-insensitive substring search on name or category.
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Creates a search filter. The term is lower-cased once up front.
    pub fn new(term: impl AsRef<str>) -> Self {
        Self { term: term.as_ref().to_lowercase() }
    }

    /// Returns true if the term is empty and the filter is a no-op.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

impl Filter for SearchFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.term.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&self.term)
            || product.category.to_lowercase().contains(&self.term)
    }

    fn description(&self) -> String {
        if self.term.is_empty() {
            "Search: any".to_string()
        } else {
            format!("Search: \"{}\"", self.term)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(name: &str, category: &str) -> Product {
        Product {
            id: "TEST".to_string(),
            name: name.to_string(),
            category: category.to_string(),
            fabric: Some("Silk".to_string()),
            description: "Matches nothing in description".to_string(),
            original_price: 1000,
            discount_price: 800,
            discount_percent: 20,
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
    fn test_matches_name() {
        let filter = SearchFilter::new("floral");
        assert!(filter.matches(&make_product("Floral Pink Kurti", "Kurti")));
        assert!(!filter.matches(&make_product("Plain Blue Kurti", "Kurti")));
    }

    #[test]
    fn test_matches_category() {
        let filter = SearchFilter::new("SAR");
        assert!(filter.matches(&make_product("Royal Red", "Sarees")));
        assert!(!filter.matches(&make_product("Royal Red", "Kurti")));
    }

    #[test]
    fn test_case_insensitivity() {
        let filter = SearchFilter::new("KuRtI");
        assert!(filter.matches(&make_product("kurti", "Other")));
        assert!(filter.matches(&make_product("Other", "KURTI")));
    }

    #[test]
    fn test_partial_match() {
        let filter = SearchFilter::new("leh");
        assert!(filter.matches(&make_product("Bridal Lehenga", "Lehengas")));
    }

    #[test]
    fn test_ignores_description_and_fabric() {
        let filter = SearchFilter::new("silk");
        assert!(!filter.matches(&make_product("Plain Kurti", "Kurti")));

        let filter = SearchFilter::new("description");
        assert!(!filter.matches(&make_product("Plain Kurti", "Kurti")));
    }

    #[test]
    fn test_empty_term_matches_all() {
        let filter = SearchFilter::new("");
        assert!(filter.is_empty());
        assert!(filter.matches(&make_product("Anything", "Whatever")));
    }

    #[test]
    fn test_whitespace_is_significant() {
        let filter = SearchFilter::new(" ");
        assert!(!filter.is_empty());
        assert!(filter.matches(&make_product("Floral Pink", "Kurti")));
        assert!(!filter.matches(&make_product("Floral", "Kurti")));
    }

    #[test]
    fn test_description() {
        assert_eq!(SearchFilter::new("Silk").description(), "Search: \"silk\"");
        assert_eq!(SearchFilter::new("").description(), "Search: any");
    }
}
