//! Trending-only filter.

use super::Filter;
use crate::catalogue::Product;

/// Filters to only include products flagged as trending.
pub struct TrendingFilter;

impl TrendingFilter {
    /// Creates a new trending filter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrendingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for TrendingFilter {
    fn matches(&self, product: &Product) -> bool {
        product.trending
    }

    fn description(&self) -> String {
        "Trending only".to_string()
    }
}
