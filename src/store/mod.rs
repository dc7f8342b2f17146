//! Product and wishlist stores: the remote document database, or an
//! in-memory snapshot optionally persisted to a JSON file.

pub mod http;
pub mod memory;

use crate::catalogue::{Product, ProductInput, ProductPatch};
use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

pub use http::HttpStore;
pub use memory::{CatalogueSnapshot, MemoryStore};

/// Product CRUD against a document store.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns every product, newest first.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Fetches one product; `None` if it does not exist.
    async fn get_product(&self, id: &str) -> Result<Option<Product>>;

    /// Returns products in one category, newest first.
    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Returns trending products, newest first.
    async fn trending_products(&self) -> Result<Vec<Product>>;

    /// Stores a new product and returns its id.
    async fn add_product(&self, input: ProductInput) -> Result<String>;

    /// Applies a partial update to an existing product.
    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<()>;

    /// Deletes a product.
    async fn delete_product(&self, id: &str) -> Result<()>;
}

/// Per-user sets of saved product ids.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Returns the saved product ids in the order they were added.
    async fn wishlist(&self, user_id: &str) -> Result<Vec<String>>;

    async fn add_to_wishlist(&self, user_id: &str, product_id: &str) -> Result<()>;

    async fn remove_from_wishlist(&self, user_id: &str, product_id: &str) -> Result<()>;

    async fn is_in_wishlist(&self, user_id: &str, product_id: &str) -> Result<bool> {
        Ok(self.wishlist(user_id).await?.iter().any(|id| id == product_id))
    }
}

/// The store selected by configuration.
pub enum Backend {
    Http(HttpStore),
    Memory(MemoryStore),
}

impl Backend {
    /// Picks the store: remote when `store_url` is set, else the JSON file
    /// when `catalogue_file` is set, else the demo catalogue in memory.
    pub async fn from_config(config: &Config) -> Result<Self> {
        if let Some(url) = &config.store_url {
            debug!("Using remote product store at {}", url);
            return Ok(Self::Http(HttpStore::new(config)?));
        }

        if let Some(path) = &config.catalogue_file {
            debug!("Using catalogue file {}", path.display());
            return Ok(Self::Memory(MemoryStore::open(path).await?));
        }

        debug!("No store configured, using demo catalogue");
        Ok(Self::Memory(MemoryStore::demo()))
    }
}

#[async_trait]
impl ProductStore for Backend {
    async fn list_products(&self) -> Result<Vec<Product>> {
        match self {
            Self::Http(store) => store.list_products().await,
            Self::Memory(store) => store.list_products().await,
        }
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        match self {
            Self::Http(store) => store.get_product(id).await,
            Self::Memory(store) => store.get_product(id).await,
        }
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        match self {
            Self::Http(store) => store.products_by_category(category).await,
            Self::Memory(store) => store.products_by_category(category).await,
        }
    }

    async fn trending_products(&self) -> Result<Vec<Product>> {
        match self {
            Self::Http(store) => store.trending_products().await,
            Self::Memory(store) => store.trending_products().await,
        }
    }

    async fn add_product(&self, input: ProductInput) -> Result<String> {
        match self {
            Self::Http(store) => store.add_product(input).await,
            Self::Memory(store) => store.add_product(input).await,
        }
    }

    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<()> {
        match self {
            Self::Http(store) => store.update_product(id, patch).await,
            Self::Memory(store) => store.update_product(id, patch).await,
        }
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        match self {
            Self::Http(store) => store.delete_product(id).await,
            Self::Memory(store) => store.delete_product(id).await,
        }
    }
}

#[async_trait]
impl WishlistStore for Backend {
    async fn wishlist(&self, user_id: &str) -> Result<Vec<String>> {
        match self {
            Self::Http(store) => store.wishlist(user_id).await,
            Self::Memory(store) => store.wishlist(user_id).await,
        }
    }

    async fn add_to_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        match self {
            Self::Http(store) => store.add_to_wishlist(user_id, product_id).await,
            Self::Memory(store) => store.add_to_wishlist(user_id, product_id).await,
        }
    }

    async fn remove_from_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        match self {
            Self::Http(store) => store.remove_from_wishlist(user_id, product_id).await,
            Self::Memory(store) => store.remove_from_wishlist(user_id, product_id).await,
        }
    }
}
