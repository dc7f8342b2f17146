//! Stateful browsing view over a product snapshot.
//!
//! Holds the snapshot, its price bounds and the current query. Every filter
//! change sends the view back to page 1.

use super::{compute_price_bounds, decode, encode, CatalogueEngine, PriceRange, Query, QueryParams};
use super::{ResultSet, SortKey};
use crate::catalogue::{CategorySelection, Product};

#[derive(Debug, Clone)]
pub struct CatalogueView {
    products: Vec<Product>,
    bounds: PriceRange,
    query: Query,
    engine: CatalogueEngine,
}

impl CatalogueView {
    /// Opens a view with default filters over the snapshot.
    pub fn new(products: Vec<Product>) -> Self {
        Self::with_engine(products, CatalogueEngine::default())
    }

    pub fn with_engine(products: Vec<Product>, engine: CatalogueEngine) -> Self {
        let bounds = compute_price_bounds(&products);
        Self { products, bounds, query: Query::with_bounds(bounds), engine }
    }

    /// Opens a view with filters restored from URL parameters.
    pub fn from_params(products: Vec<Product>, params: &QueryParams, engine: CatalogueEngine) -> Self {
        let bounds = compute_price_bounds(&products);
        let query = decode(params, bounds);
        Self { products, bounds, query, engine }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn bounds(&self) -> PriceRange {
        self.bounds
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn engine(&self) -> CatalogueEngine {
        self.engine
    }

    /// Swaps in a fresh snapshot. An unset price range is initialized to the
    /// new bounds; a range the user already chose is kept.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.bounds = compute_price_bounds(&products);
        self.products = products;

        if self.query.price_range.is_unset() {
            self.query.price_range = self.bounds;
        }
    }

    pub fn set_category(&mut self, category: impl Into<CategorySelection>) {
        self.query.category = category.into();
        self.query.page = 1;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.query.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.query.page = 1;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.query.price_range = range;
        self.query.page = 1;
    }

    /// Moves to another page; out-of-range pages are clamped when read.
    pub fn set_page(&mut self, page: usize) {
        self.query.page = page;
    }

    /// Resets every filter, spanning the full price range again.
    pub fn clear_filters(&mut self) {
        self.query = Query::with_bounds(self.bounds);
    }

    /// Returns true if anything narrows or reorders the catalogue.
    pub fn has_active_filters(&self) -> bool {
        !self.query.category.is_all()
            || !self.query.search.is_empty()
            || self.query.sort != SortKey::Relevance
            || self.query.price_range != self.bounds
    }

    /// Applies the current query to the snapshot.
    pub fn result(&self) -> ResultSet {
        self.engine.apply(&self.products, &self.query)
    }

    /// URL parameters describing the current filters.
    pub fn params(&self) -> QueryParams {
        encode(&self.query, self.bounds)
    }

    /// Trending products in snapshot order, ignoring the current filters.
    pub fn trending(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.trending).collect()
    }
}
