//! Category overview and trending commands.

use crate::catalogue::category_counts;
use crate::config::Config;
use crate::format::Formatter;
use crate::store::{Backend, ProductStore};
use anyhow::{Context, Result};
use tracing::info;

/// Lists categories with their product counts.
pub struct CategoriesCommand {
    config: Config,
}

impl CategoriesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store).await
    }

    pub async fn execute_with_store(&self, store: &impl ProductStore) -> Result<String> {
        let products = store.list_products().await?;
        let counts = category_counts(&products);

        info!("Counted {} products in {} categories", products.len(), counts.len());

        Ok(Formatter::new(self.config.format).format_categories(&counts))
    }
}

/// Lists trending products, newest first.
pub struct TrendingCommand {
    config: Config,
}

impl TrendingCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, limit: Option<usize>) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store, limit).await
    }

    pub async fn execute_with_store(
        &self,
        store: &impl ProductStore,
        limit: Option<usize>,
    ) -> Result<String> {
        let mut products = store.trending_products().await?;

        if let Some(limit) = limit {
            products.truncate(limit);
        }

        info!("Found {} trending products", products.len());

        Ok(Formatter::new(self.config.format).format_products(&products))
    }
}
