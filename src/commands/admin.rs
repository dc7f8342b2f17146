//! Admin product management command implementation.

use crate::admin::AdminService;
use crate::catalogue::{ProductInput, ProductPatch};
use crate::config::Config;
use crate::session::Session;
use crate::store::{Backend, ProductStore};
use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Add(ProductInput),
    Update { id: String, patch: ProductPatch },
    Delete(String),
}

/// Creates, edits and deletes products.
pub struct AdminCommand {
    config: Config,
    session: Session,
}

impl AdminCommand {
    pub fn new(config: Config, session: Session) -> Self {
        Self { config, session }
    }

    pub async fn execute(&self, action: AdminAction) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store, action).await
    }

    /// Runs with a provided store (for testing).
    pub async fn execute_with_store(
        &self,
        store: &impl ProductStore,
        action: AdminAction,
    ) -> Result<String> {
        let service = AdminService::new(store, &self.session);

        match action {
            AdminAction::Add(input) => {
                let name = input.name.clone();
                let id = service.create(input).await?;
                Ok(format!("Added product {} ({})", id, name))
            }
            AdminAction::Update { id, patch } => {
                service.update(&id, patch).await?;
                Ok(format!("Updated product {}", id))
            }
            AdminAction::Delete(id) => {
                service.delete(&id).await?;
                Ok(format!("Deleted product {}", id))
            }
        }
    }
}
