//! Product detail command implementation.

use crate::catalogue::Product;
use crate::config::Config;
use crate::format::Formatter;
use crate::session::Session;
use crate::store::{Backend, ProductStore, WishlistStore};
use crate::wishlist::WishlistService;
use anyhow::{bail, Context, Result};
use tracing::{info, warn};

/// Shows products by id.
pub struct ProductCommand {
    config: Config,
    session: Session,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config, session: Session) -> Self {
        Self { config, session }
    }

    /// Looks up one product and returns its formatted detail.
    pub async fn execute(&self, id: &str) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store, id).await
    }

    /// Looks up one product with a provided store (for testing).
    pub async fn execute_with_store<S>(&self, store: &S, id: &str) -> Result<String>
    where
        S: ProductStore + WishlistStore,
    {
        let id = id.trim();
        if id.is_empty() {
            bail!("Product id must not be empty");
        }

        info!("Looking up product: {}", id);

        let Some(product) = store.get_product(id).await? else {
            bail!("Product not found: {}", id);
        };

        let saved = if self.session.is_signed_in() {
            Some(WishlistService::new(store, &self.session).contains(&product.id).await?)
        } else {
            None
        };

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&product, saved))
    }

    /// Looks up several products.
    pub async fn execute_batch(&self, ids: &[String]) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_batch_with_store(&store, ids).await
    }

    /// Looks up several products with a provided store (for testing).
    /// Unknown ids are skipped with a warning.
    pub async fn execute_batch_with_store(
        &self,
        store: &impl ProductStore,
        ids: &[String],
    ) -> Result<String> {
        let mut products: Vec<Product> = Vec::new();

        for id in ids {
            let id = id.trim();
            match store.get_product(id).await {
                Ok(Some(product)) => products.push(product),
                Ok(None) => warn!("Skipping unknown product: {}", id),
                Err(e) => warn!("Failed to fetch {}: {:#}", id, e),
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}
