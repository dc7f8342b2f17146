//! In-memory store, optionally bound to a JSON file.

use super::{ProductStore, WishlistStore};
use crate::catalogue::{demo_catalogue, CategorySelection, Product, ProductInput, ProductPatch};
use crate::filters::FilterChainBuilder;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Everything the memory store holds, as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    pub products: Vec<Product>,
    #[serde(default)]
    pub wishlists: BTreeMap<String, Vec<String>>,
}

/// Accepted on-disk shapes: a full snapshot or a bare product array.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full(CatalogueSnapshot),
    Products(Vec<Product>),
}

impl From<SnapshotFile> for CatalogueSnapshot {
    fn from(file: SnapshotFile) -> Self {
        match file {
            SnapshotFile::Full(snapshot) => snapshot,
            SnapshotFile::Products(products) => Self { products, wishlists: BTreeMap::new() },
        }
    }
}

/// Store backed by a snapshot in memory. Products are kept newest first.
pub struct MemoryStore {
    state: RwLock<CatalogueSnapshot>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// Creates an unpersisted store over the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self::from_snapshot(CatalogueSnapshot { products, wishlists: BTreeMap::new() })
    }

    pub fn from_snapshot(snapshot: CatalogueSnapshot) -> Self {
        Self { state: RwLock::new(snapshot), path: None }
    }

    /// Creates an unpersisted store over the demo catalogue.
    pub fn demo() -> Self {
        Self::new(demo_catalogue())
    }

    /// Loads a store from a JSON file and writes every change back to it.
    /// A missing file starts an empty catalogue.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let snapshot = if path.exists() {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read catalogue file: {}", path.display()))?;

            let file: SnapshotFile = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse catalogue file: {}", path.display()))?;

            file.into()
        } else {
            debug!("Catalogue file {} not found, starting empty", path.display());
            CatalogueSnapshot::default()
        };

        info!("Loaded {} products from {}", snapshot.products.len(), path.display());

        Ok(Self { state: RwLock::new(snapshot), path: Some(path.to_path_buf()) })
    }

    /// Returns a copy of the current contents.
    pub async fn snapshot(&self) -> CatalogueSnapshot {
        self.state.read().await.clone()
    }

    async fn persist(&self, snapshot: &CatalogueSnapshot) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(snapshot).context("Failed to encode catalogue")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write catalogue file: {}", path.display()))?;

        debug!("Saved catalogue to {}", path.display());
        Ok(())
    }
}

/// Next free numeric id, one above the highest numeric id in use.
fn next_id(products: &[Product]) -> String {
    let highest = products.iter().filter_map(|p| p.id.parse::<u64>().ok()).max().unwrap_or(0);
    (highest + 1).to_string()
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.state.read().await.products.clone())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let filters = FilterChainBuilder::new().category(&CategorySelection::parse(category)).build();
        Ok(filters.select(&self.state.read().await.products))
    }

    async fn trending_products(&self) -> Result<Vec<Product>> {
        let filters = FilterChainBuilder::new().trending(true).build();
        Ok(filters.select(&self.state.read().await.products))
    }

    async fn add_product(&self, input: ProductInput) -> Result<String> {
        let mut state = self.state.write().await;
        let mut next = state.clone();

        let id = next_id(&next.products);
        let product = input.into_product(id.clone(), Utc::now());
        next.products.insert(0, product);

        self.persist(&next).await?;
        *state = next;
        info!("Added product {}", id);
        Ok(id)
    }

    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();

        let Some(product) = next.products.iter_mut().find(|p| p.id == id) else {
            bail!("Product not found: {}", id);
        };
        patch.apply(product, Utc::now())?;

        self.persist(&next).await?;
        *state = next;
        info!("Updated product {}", id);
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();

        let before = next.products.len();
        next.products.retain(|p| p.id != id);
        if next.products.len() == before {
            bail!("Product not found: {}", id);
        }

        self.persist(&next).await?;
        *state = next;
        info!("Deleted product {}", id);
        Ok(())
    }
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn wishlist(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self.state.read().await.wishlists.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_to_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();

        let ids = next.wishlists.entry(user_id.to_string()).or_default();
        if ids.iter().any(|id| id == product_id) {
            return Ok(());
        }
        ids.push(product_id.to_string());

        self.persist(&next).await?;
        *state = next;
        Ok(())
    }

    async fn remove_from_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let mut next = state.clone();

        if let Some(ids) = next.wishlists.get_mut(user_id) {
            ids.retain(|id| id != product_id);
            if ids.is_empty() {
                next.wishlists.remove(user_id);
            }
        }

        self.persist(&next).await?;
        *state = next;
        Ok(())
    }
}
