//! Inclusive price ranges and dataset price bounds.

use crate::catalogue::Product;
use serde::{Deserialize, Serialize};

/// Inclusive discount-price range.
///
/// `(0, 0)` is the "unset" sentinel: it never filters anything out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    /// The unset sentinel.
    pub const UNSET: PriceRange = PriceRange { min: 0, max: 0 };

    /// Creates a range, swapping the bounds if they are given in reverse.
    pub fn new(min: u64, max: u64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Returns true for the `(0, 0)` sentinel.
    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    /// Returns true if the price lies inside the range (bounds inclusive).
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Parses the `"<min>-<max>"` form. Anything other than exactly two
    /// unsigned integers joined by one hyphen, in ascending order, is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split('-');
        let min = parse_bound(parts.next()?)?;
        let max = parse_bound(parts.next()?)?;

        if parts.next().is_some() || min > max {
            return None;
        }

        Some(Self { min, max })
    }
}

impl std::fmt::Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Digits only: no sign, no whitespace.
fn parse_bound(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Returns the lowest and highest discount price in the collection, or the
/// `(0, 0)` sentinel when it is empty.
pub fn compute_price_bounds(products: &[Product]) -> PriceRange {
    let mut prices = products.iter().map(|p| p.discount_price);

    let Some(first) = prices.next() else {
        return PriceRange::UNSET;
    };

    let (min, max) = prices.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    PriceRange { min, max }
}
