//! Typed errors for catalogue services.

use thiserror::Error;

/// Reasons a product payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("discount price {discount} exceeds original price {original}")]
    DiscountAboveOriginal { original: u64, discount: u64 },
}

/// Errors surfaced by the wishlist and admin services.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("sign in to continue")]
    Unauthenticated,

    #[error("admin access required")]
    Forbidden,

    #[error("product not found: {0}")]
    NotFound(String),

    #[error("invalid product: {0}")]
    InvalidProduct(#[from] ValidationError),

    #[error("store request failed: {0:#}")]
    Store(anyhow::Error),
}
