//! Product filtering system with composable filters.

pub mod category;
pub mod price;
pub mod search;
pub mod trending;

use crate::catalogue::{CategorySelection, Product};
use crate::query::PriceRange;

pub use category::CategoryFilter;
pub use price::PriceFilter;
pub use search::SearchFilter;
pub use trending::TrendingFilter;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Returns the matching products of a snapshot, in snapshot order.
    pub fn select(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from a query.
///
/// Filters that would let everything through are not added.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds an exact category filter unless the selection is `All`.
    pub fn category(mut self, selection: &CategorySelection) -> Self {
        if !selection.is_all() {
            self.chain.add(CategoryFilter::new(selection.clone()));
        }
        self
    }

    /// Adds a free-text search filter unless the term is empty.
    pub fn search(mut self, term: &str) -> Self {
        if !term.is_empty() {
            self.chain.add(SearchFilter::new(term));
        }
        self
    }

    /// Adds a price range filter unless the range is the unset sentinel.
    pub fn price_range(mut self, range: PriceRange) -> Self {
        if !range.is_unset() {
            self.chain.add(PriceFilter::new(range));
        }
        self
    }

    /// Adds a trending-only filter.
    pub fn trending(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(TrendingFilter::new());
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(id: &str, name: &str, category: &str, price: u64, trending: bool) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            fabric: None,
            description: String::new(),
            original_price: price * 2,
            discount_price: price,
            discount_percent: 50,
            images: vec!["https://img.example/1.jpg".to_string()],
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            trending,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            make_product("1", "Silk Red Saree", "Sarees", 5000, true),
            make_product("2", "Floral Kurti", "Kurti", 1500, false),
            make_product("3", "Banarasi Saree", "Sarees", 9000, false),
            make_product("4", "Printed Kurti", "Kurti", 900, true),
        ]
    }

    // FilterChain tests

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_default() {
        let chain = FilterChain::default();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::range(1000, 6000));
        chain.add(CategoryFilter::new(CategorySelection::parse("Sarees")));

        assert_eq!(chain.len(), 2);

        let products = sample();
        assert!(chain.matches(&products[0]));
        assert!(!chain.matches(&products[1])); // wrong category
        assert!(!chain.matches(&products[2])); // too expensive
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::new();
        assert_eq!(chain.select(&sample()).len(), 4);
    }

    #[test]
    fn test_select_preserves_order() {
        let chain = FilterChainBuilder::new().search("kurti").build();
        let ids: Vec<String> = chain.select(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn test_filter_chain_descriptions() {
        let chain = FilterChainBuilder::new()
            .category(&CategorySelection::parse("Kurti"))
            .search("floral")
            .price_range(PriceRange::new(100, 2000))
            .trending(true)
            .build();

        let descriptions = chain.descriptions();
        assert_eq!(descriptions.len(), 4);
        assert!(descriptions[0].contains("Category"));
        assert!(descriptions[1].contains("Search"));
        assert!(descriptions[2].contains("Price"));
        assert!(descriptions[3].contains("Trending"));
    }

    // FilterChainBuilder tests

    #[test]
    fn test_filter_chain_builder_no_filters_when_defaults() {
        let chain = FilterChainBuilder::new()
            .category(&CategorySelection::all())
            .search("")
            .price_range(PriceRange::UNSET)
            .trending(false)
            .build();

        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain_builder_default() {
        let chain = FilterChainBuilder::default().build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_all_filters_combined() {
        let chain = FilterChainBuilder::new()
            .category(&CategorySelection::parse("Sarees"))
            .search("silk")
            .price_range(PriceRange::new(1000, 6000))
            .trending(true)
            .build();

        let matched = chain.select(&sample());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }
}
