//! Wishlist operations for the signed-in user.

use crate::error::CatalogueError;
use crate::session::Session;
use crate::store::WishlistStore;
use tracing::{debug, info};

pub struct WishlistService<'a, S: WishlistStore + ?Sized> {
    store: &'a S,
    session: &'a Session,
}

impl<'a, S: WishlistStore + ?Sized> WishlistService<'a, S> {
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self { store, session }
    }

    fn require_user(&self) -> Result<&'a str, CatalogueError> {
        self.session.user_id().ok_or(CatalogueError::Unauthenticated)
    }

    /// Saved product ids. Anonymous sessions have an empty wishlist.
    pub async fn list(&self) -> Result<Vec<String>, CatalogueError> {
        let Some(user_id) = self.session.user_id() else {
            debug!("No user signed in, wishlist is empty");
            return Ok(Vec::new());
        };

        self.store.wishlist(user_id).await.map_err(CatalogueError::Store)
    }

    pub async fn contains(&self, product_id: &str) -> Result<bool, CatalogueError> {
        let Some(user_id) = self.session.user_id() else {
            return Ok(false);
        };

        self.store.is_in_wishlist(user_id, product_id).await.map_err(CatalogueError::Store)
    }

    pub async fn add(&self, product_id: &str) -> Result<(), CatalogueError> {
        let user_id = self.require_user()?;

        self.store.add_to_wishlist(user_id, product_id).await.map_err(CatalogueError::Store)?;
        info!("Saved {} to wishlist of {}", product_id, user_id);
        Ok(())
    }

    pub async fn remove(&self, product_id: &str) -> Result<(), CatalogueError> {
        let user_id = self.require_user()?;

        self.store
            .remove_from_wishlist(user_id, product_id)
            .await
            .map_err(CatalogueError::Store)?;
        info!("Removed {} from wishlist of {}", product_id, user_id);
        Ok(())
    }

    /// Adds the product if absent, removes it otherwise. Returns whether the
    /// product is saved afterwards.
    pub async fn toggle(&self, product_id: &str) -> Result<bool, CatalogueError> {
        self.require_user()?;

        if self.contains(product_id).await? {
            self.remove(product_id).await?;
            Ok(false)
        } else {
            self.add(product_id).await?;
            Ok(true)
        }
    }
}
