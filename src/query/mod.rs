//! Catalogue query engine: filter, search, sort and paginate product snapshots.
//!
//! The engine never mutates its input and never fails. Malformed or
//! out-of-range input is normalized to the nearest valid value.

pub mod params;
pub mod range;
pub mod sort;
pub mod view;

use crate::catalogue::{CategorySelection, Product};
use crate::filters::FilterChainBuilder;
use serde::{Deserialize, Serialize};
use tracing::trace;

pub use params::{decode, encode, QueryParams};
pub use range::{compute_price_bounds, PriceRange};
pub use sort::SortKey;
pub use view::CatalogueView;

/// Products per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// The view being requested: what to match, how to order it, which page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub category: CategorySelection,
    pub search: String,
    pub price_range: PriceRange,
    pub sort: SortKey,
    /// 1-based
    pub page: usize,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            category: CategorySelection::all(),
            search: String::new(),
            price_range: PriceRange::UNSET,
            sort: SortKey::Relevance,
            page: 1,
        }
    }
}

impl Query {
    /// Default query with the price range spanning the dataset bounds.
    pub fn with_bounds(bounds: PriceRange) -> Self {
        Self { price_range: bounds, ..Self::default() }
    }

    pub fn category(mut self, category: impl Into<CategorySelection>) -> Self {
        self.category = category.into();
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Outcome of applying a query to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Every match, sorted
    pub matched: Vec<Product>,
    /// The requested page of `matched`
    pub page: Vec<Product>,
    pub total_count: usize,
    /// At least 1, even with no matches
    pub total_pages: usize,
    /// The page actually sliced after clamping
    pub page_number: usize,
    /// Lowest discount price of the whole input, not just the matches
    pub min_price: u64,
    /// Highest discount price of the whole input, not just the matches
    pub max_price: u64,
}

impl ResultSet {
    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Dataset bounds the result was computed against.
    pub fn bounds(&self) -> PriceRange {
        PriceRange { min: self.min_price, max: self.max_price }
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }
}

/// Query engine with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEngine {
    page_size: usize,
}

impl Default for CatalogueEngine {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE }
    }
}

impl CatalogueEngine {
    /// Creates an engine. A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total` items; never less than one.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Applies the query to the snapshot.
    pub fn apply(&self, products: &[Product], query: &Query) -> ResultSet {
        let bounds = compute_price_bounds(products);

        let filters = FilterChainBuilder::new()
            .category(&query.category)
            .search(&query.search)
            .price_range(query.price_range)
            .build();

        if !filters.is_empty() {
            trace!("Active filters: {}", filters.descriptions().join(", "));
        }

        let mut matched = filters.select(products);
        query.sort.apply(&mut matched);

        let total_count = matched.len();
        let total_pages = self.total_pages(total_count);
        let page_number = query.page.clamp(1, total_pages);

        let start = (page_number - 1) * self.page_size;
        let end = (start + self.page_size).min(total_count);
        let page = matched.get(start..end).map(<[Product]>::to_vec).unwrap_or_default();

        trace!(
            "Matched {} of {} products, page {}/{}",
            total_count,
            products.len(),
            page_number,
            total_pages
        );

        ResultSet {
            matched,
            page,
            total_count,
            total_pages,
            page_number,
            min_price: bounds.min,
            max_price: bounds.max,
        }
    }
}

/// Applies the query with the default page size.
pub fn apply_query(products: &[Product], query: &Query) -> ResultSet {
    CatalogueEngine::default().apply(products, query)
}
