//! Wishlist command implementation.

use crate::config::Config;
use crate::error::CatalogueError;
use crate::format::Formatter;
use crate::session::Session;
use crate::store::{Backend, ProductStore, WishlistStore};
use crate::wishlist::WishlistService;
use anyhow::{Context, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistAction {
    List,
    Add(String),
    Remove(String),
}

/// Shows or edits the signed-in user's wishlist.
pub struct WishlistCommand {
    config: Config,
    session: Session,
}

impl WishlistCommand {
    pub fn new(config: Config, session: Session) -> Self {
        Self { config, session }
    }

    pub async fn execute(&self, action: &WishlistAction) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store, action).await
    }

    /// Runs with a provided store (for testing).
    pub async fn execute_with_store<S>(&self, store: &S, action: &WishlistAction) -> Result<String>
    where
        S: ProductStore + WishlistStore,
    {
        let service = WishlistService::new(store, &self.session);

        match action {
            WishlistAction::List => {
                if !self.session.is_signed_in() {
                    return Err(CatalogueError::Unauthenticated.into());
                }

                let ids = service.list().await?;
                debug!("Wishlist holds {} ids", ids.len());

                let mut products = Vec::with_capacity(ids.len());
                for id in &ids {
                    match store.get_product(id).await? {
                        Some(product) => products.push(product),
                        None => warn!("Wishlist entry {} no longer exists", id),
                    }
                }

                Ok(Formatter::new(self.config.format).format_products(&products))
            }

            WishlistAction::Add(id) => {
                let id = id.trim();
                let Some(product) = store.get_product(id).await? else {
                    return Err(CatalogueError::NotFound(id.to_string()).into());
                };

                service.add(id).await?;
                Ok(format!("Saved {} to your wishlist", product.name))
            }

            WishlistAction::Remove(id) => {
                let id = id.trim();
                service.remove(id).await?;
                Ok(format!("Removed {} from your wishlist", id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::session::{Role, User};
    use crate::store::MemoryStore;

    fn make_test_config() -> Config {
        Config { format: OutputFormat::Csv, ..Config::default() }
    }

    fn customer() -> Session {
        Session::signed_in(User::new("u1", Role::Customer))
    }

    #[tokio::test]
    async fn test_wishlist_requires_sign_in() {
        let store = MemoryStore::demo();
        let cmd = WishlistCommand::new(make_test_config(), Session::anonymous());

        for action in [
            WishlistAction::List,
            WishlistAction::Add("1".to_string()),
            WishlistAction::Remove("1".to_string()),
        ] {
            let err = cmd.execute_with_store(&store, &action).await.unwrap_err();
            assert_eq!(err.to_string(), "sign in to continue");
        }
    }

    #[tokio::test]
    async fn test_wishlist_add_list_remove() {
        let store = MemoryStore::demo();
        let cmd = WishlistCommand::new(make_test_config(), customer());

        let output = cmd.execute_with_store(&store, &WishlistAction::Add("2".into())).await.unwrap();
        assert!(output.starts_with("Saved "));
        cmd.execute_with_store(&store, &WishlistAction::Add("71".into())).await.unwrap();

        let output = cmd.execute_with_store(&store, &WishlistAction::List).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2,"));
        assert!(lines[2].starts_with("71,"));

        cmd.execute_with_store(&store, &WishlistAction::Remove("2".into())).await.unwrap();
        let output = cmd.execute_with_store(&store, &WishlistAction::List).await.unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_wishlist_add_unknown_product() {
        let store = MemoryStore::demo();
        let cmd = WishlistCommand::new(make_test_config(), customer());

        let err = cmd.execute_with_store(&store, &WishlistAction::Add("nope".into())).await.unwrap_err();
        assert!(err.to_string().contains("product not found: nope"));
        assert!(store.wishlist("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_skips_deleted_products() {
        let store = MemoryStore::demo();
        store.add_to_wishlist("u1", "5").await.unwrap();
        store.add_to_wishlist("u1", "6").await.unwrap();
        store.delete_product("5").await.unwrap();

        let cmd = WishlistCommand::new(make_test_config(), customer());
        let output = cmd.execute_with_store(&store, &WishlistAction::List).await.unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("6,"));
    }
}
