//! catalogue - Product catalogue browsing engine and CLI
//!
//! Filters, searches, sorts and pages product snapshots, and encodes the
//! current view as shareable URL parameters.

pub mod admin;
pub mod catalogue;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod query;
pub mod session;
pub mod store;
pub mod wishlist;

pub use catalogue::{CategorySelection, Product, ProductInput, ProductPatch};
pub use config::Config;
pub use error::{CatalogueError, ValidationError};
pub use query::{
    apply_query, compute_price_bounds, decode, encode, CatalogueEngine, CatalogueView, PriceRange,
    Query, QueryParams, ResultSet, SortKey,
};
pub use session::{Role, Session, User};
