//! Product management for admin sessions.

use crate::catalogue::{Product, ProductInput, ProductPatch};
use crate::error::CatalogueError;
use crate::session::Session;
use crate::store::ProductStore;
use chrono::Utc;
use tracing::{debug, info, warn};

pub struct AdminService<'a, S: ProductStore + ?Sized> {
    store: &'a S,
    session: &'a Session,
}

impl<'a, S: ProductStore + ?Sized> AdminService<'a, S> {
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self { store, session }
    }

    fn authorize(&self) -> Result<(), CatalogueError> {
        if !self.session.is_signed_in() {
            return Err(CatalogueError::Unauthenticated);
        }
        if !self.session.is_admin() {
            warn!("Rejected admin operation for {:?}", self.session.user_id());
            return Err(CatalogueError::Forbidden);
        }
        Ok(())
    }

    async fn require_product(&self, id: &str) -> Result<Product, CatalogueError> {
        self.store
            .get_product(id)
            .await
            .map_err(CatalogueError::Store)?
            .ok_or_else(|| CatalogueError::NotFound(id.to_string()))
    }

    /// Validates and stores a new product, returning its id.
    pub async fn create(&self, input: ProductInput) -> Result<String, CatalogueError> {
        self.authorize()?;
        input.validate()?;

        let id = self.store.add_product(input).await.map_err(CatalogueError::Store)?;
        info!("Created product {}", id);
        Ok(id)
    }

    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<(), CatalogueError> {
        self.authorize()?;
        patch.validate()?;

        let mut preview = self.require_product(id).await?;
        if patch.is_empty() {
            debug!("Empty update for {}, nothing to do", id);
            return Ok(());
        }

        // Check the merged prices before anything is written
        patch.clone().apply(&mut preview, Utc::now())?;

        self.store.update_product(id, patch).await.map_err(CatalogueError::Store)?;
        info!("Updated product {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), CatalogueError> {
        self.authorize()?;
        self.require_product(id).await?;

        self.store.delete_product(id).await.map_err(CatalogueError::Store)?;
        info!("Deleted product {}", id);
        Ok(())
    }
}
