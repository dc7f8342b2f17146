//! CLI command implementations.

pub mod admin;
pub mod browse;
pub mod listing;
pub mod product;
pub mod wishlist;

pub use admin::{AdminAction, AdminCommand};
pub use browse::{BrowseArgs, BrowseCommand};
pub use listing::{CategoriesCommand, TrendingCommand};
pub use product::ProductCommand;
pub use wishlist::{WishlistAction, WishlistCommand};
