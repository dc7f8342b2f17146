//! Catalogue data model: products, admin payloads, categories and demo data.

pub mod categories;
pub mod models;
pub mod seed;

pub use categories::{
    category_counts, is_known_category, CategoryCount, CategorySelection, ALL_CATEGORIES,
    CATEGORIES,
};
pub use models::{derive_discount_percent, Product, ProductInput, ProductPatch};
pub use seed::demo_catalogue;
