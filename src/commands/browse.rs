//! Browse command implementation.

use crate::catalogue::{CategorySelection, Product};
use crate::config::Config;
use crate::format::Formatter;
use crate::query::{CatalogueEngine, CatalogueView, PriceRange, QueryParams, SortKey};
use crate::store::{Backend, ProductStore};
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Filters for one browse request. Unset fields keep the value decoded from
/// `params`, or the default.
#[derive(Debug, Clone, Default)]
pub struct BrowseArgs {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
    /// Shared query string to start from, e.g. `cat=Sarees&sort=price-asc`
    pub params: Option<String>,
    /// Print the share query string instead of the results
    pub link: bool,
}

/// Filters, sorts and pages the catalogue.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs against the configured store and returns formatted output.
    pub async fn execute(&self, args: &BrowseArgs) -> Result<String> {
        let store = Backend::from_config(&self.config).await.context("Failed to open product store")?;

        self.execute_with_store(&store, args).await
    }

    /// Runs against a provided store (for testing).
    pub async fn execute_with_store(
        &self,
        store: &impl ProductStore,
        args: &BrowseArgs,
    ) -> Result<String> {
        let products = store.list_products().await?;
        debug!("Loaded {} products", products.len());

        let view = self.build_view(products, args);

        if args.link {
            return Ok(format!("?{}", view.params()));
        }

        let result = view.result();
        info!(
            "Showing page {}/{} of {} matches",
            result.page_number, result.total_pages, result.total_count
        );

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_result(&result))
    }

    fn build_view(&self, products: Vec<Product>, args: &BrowseArgs) -> CatalogueView {
        let engine = CatalogueEngine::new(self.config.page_size);
        let params = args.params.as_deref().map(QueryParams::parse).unwrap_or_default();
        let mut view = CatalogueView::from_params(products, &params, engine);

        if let Some(category) = &args.category {
            view.set_category(CategorySelection::parse(category));
        }

        if let Some(search) = &args.search {
            view.set_search(search.trim());
        }

        if args.min_price.is_some() || args.max_price.is_some() {
            let current = view.query().price_range;
            let range = PriceRange::new(
                args.min_price.unwrap_or(current.min),
                args.max_price.unwrap_or(current.max),
            );
            view.set_price_range(range);
        }

        if let Some(sort) = args.sort {
            view.set_sort(sort);
        }

        if let Some(page) = args.page {
            view.set_page(page);
        }

        view
    }
}
