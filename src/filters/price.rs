//! Price range filter.

use super::Filter;
use crate::catalogue::Product;
use crate::query::PriceRange;

/// Filters products by discount price.
pub struct PriceFilter {
    range: PriceRange,
}

impl PriceFilter {
    /// Creates a price filter for the range.
    pub fn new(range: PriceRange) -> Self {
        Self { range }
    }

    /// Creates a filter with both bounds.
    pub fn range(min: u64, max: u64) -> Self {
        Self::new(PriceRange::new(min, max))
    }
}

impl Filter for PriceFilter {
    fn matches(&self, product: &Product) -> bool {
        // The (0, 0) sentinel means "not initialized yet", not "free only"
        if self.range.is_unset() {
            return true;
        }

        self.range.contains(product.discount_price)
    }

    fn description(&self) -> String {
        if self.range.is_unset() {
            "Price: any".to_string()
        } else {
            format!("Price: {} - {}", self.range.min, self.range.max)
        }
    }
}
