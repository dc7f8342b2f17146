//! catalogue - Browse, search and manage a product catalogue from the terminal.

use anyhow::Result;
use catalogue::catalogue::{ProductInput, ProductPatch};
use catalogue::commands::{
    AdminAction, AdminCommand, BrowseArgs, BrowseCommand, CategoriesCommand, ProductCommand,
    TrendingCommand, WishlistAction, WishlistCommand,
};
use catalogue::config::{Config, OutputFormat};
use catalogue::query::SortKey;
use catalogue::session::{Role, Session};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalogue",
    version,
    about = "Browse, search and manage a product catalogue",
    long_about = "Filters, searches, sorts and pages a product catalogue, and prints shareable query strings for any view."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the remote product store
    #[arg(long, global = true, env = "CATALOGUE_STORE_URL")]
    store_url: Option<String>,

    /// JSON catalogue file (used when no store URL is set)
    #[arg(long, global = true, env = "CATALOGUE_FILE")]
    file: Option<PathBuf>,

    /// Signed-in user id
    #[arg(short, long, global = true, env = "CATALOGUE_USER")]
    user: Option<String>,

    /// Sign in with the admin role
    #[arg(long, global = true)]
    admin: bool,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Products per page
    #[arg(long, global = true, env = "CATALOGUE_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, search, sort and page the catalogue
    #[command(alias = "b")]
    Browse {
        /// Category name, or "All"
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive text matched against name and category
        #[arg(short, long)]
        search: Option<String>,

        /// Minimum selling price
        #[arg(long)]
        min_price: Option<u64>,

        /// Maximum selling price
        #[arg(long)]
        max_price: Option<u64>,

        /// Sort order: relevance, price-asc, price-desc, discount-desc
        #[arg(long)]
        sort: Option<SortKey>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<usize>,

        /// Start from a shared query string, e.g. "cat=Sarees&sort=price-asc"
        #[arg(long)]
        params: Option<String>,

        /// Print the share query string for this view instead of results
        #[arg(long)]
        link: bool,
    },

    /// Show products by id
    #[command(alias = "p")]
    Product {
        /// Product id(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List categories with product counts
    Categories,

    /// List trending products
    Trending {
        /// Maximum number of products
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Show or edit your wishlist
    #[command(alias = "w")]
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistCmd>,
    },

    /// Manage products (requires --admin)
    Admin {
        #[command(subcommand)]
        action: AdminCmd,
    },
}

#[derive(Subcommand)]
enum WishlistCmd {
    /// List saved products
    List,
    /// Save a product
    Add { id: String },
    /// Remove a saved product
    Remove { id: String },
}

#[derive(Subcommand)]
enum AdminCmd {
    /// Add a product
    Add(AddArgs),
    /// Update fields of a product
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    fabric: Option<String>,
    #[arg(long)]
    original_price: u64,
    #[arg(long)]
    discount_price: u64,
    /// Explicit discount percentage; derived from the prices when omitted
    #[arg(long)]
    discount_percent: Option<u8>,
    /// Image URLs (comma-separated), first is the cover
    #[arg(long, value_delimiter = ',', required = true)]
    images: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,
    /// Mark as out of stock
    #[arg(long)]
    out_of_stock: bool,
    #[arg(long)]
    trending: bool,
}

impl From<AddArgs> for ProductInput {
    fn from(args: AddArgs) -> Self {
        ProductInput {
            name: args.name,
            description: args.description,
            category: args.category,
            fabric: args.fabric,
            original_price: args.original_price,
            discount_price: args.discount_price,
            discount_percent: args.discount_percent,
            images: args.images,
            sizes: args.sizes,
            colors: args.colors,
            in_stock: !args.out_of_stock,
            trending: args.trending,
        }
    }
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    fabric: Option<String>,
    #[arg(long)]
    original_price: Option<u64>,
    #[arg(long)]
    discount_price: Option<u64>,
    #[arg(long)]
    discount_percent: Option<u8>,
    #[arg(long, value_delimiter = ',')]
    images: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    colors: Option<Vec<String>>,
    #[arg(long)]
    in_stock: Option<bool>,
    #[arg(long)]
    trending: Option<bool>,
}

impl From<UpdateArgs> for ProductPatch {
    fn from(args: UpdateArgs) -> Self {
        ProductPatch {
            name: args.name,
            description: args.description,
            category: args.category,
            fabric: args.fabric,
            original_price: args.original_price,
            discount_price: args.discount_price,
            discount_percent: args.discount_percent,
            images: args.images,
            sizes: args.sizes,
            colors: args.colors,
            in_stock: args.in_stock,
            trending: args.trending,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(url) = cli.store_url {
        config.store_url = Some(url);
    }
    if let Some(file) = cli.file {
        config.catalogue_file = Some(file);
    }
    if let Some(user) = cli.user {
        config.user = Some(user);
    }
    if cli.admin {
        config.role = Role::Admin;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    let session = Session::from_user_id(config.user.as_deref(), config.role);

    let output = match cli.command {
        Commands::Browse { category, search, min_price, max_price, sort, page, params, link } => {
            let args = BrowseArgs { category, search, min_price, max_price, sort, page, params, link };
            BrowseCommand::new(config).execute(&args).await?
        }

        Commands::Product { ids } => {
            let cmd = ProductCommand::new(config, session);

            if ids.len() == 1 {
                cmd.execute(&ids[0]).await?
            } else {
                cmd.execute_batch(&ids).await?
            }
        }

        Commands::Categories => CategoriesCommand::new(config).execute().await?,

        Commands::Trending { max } => TrendingCommand::new(config).execute(max).await?,

        Commands::Wishlist { action } => {
            let action = match action.unwrap_or(WishlistCmd::List) {
                WishlistCmd::List => WishlistAction::List,
                WishlistCmd::Add { id } => WishlistAction::Add(id),
                WishlistCmd::Remove { id } => WishlistAction::Remove(id),
            };
            WishlistCommand::new(config, session).execute(&action).await?
        }

        Commands::Admin { action } => {
            let action = match action {
                AdminCmd::Add(args) => AdminAction::Add(args.into()),
                AdminCmd::Update { id, fields } => AdminAction::Update { id, patch: fields.into() },
                AdminCmd::Delete { id } => AdminAction::Delete(id),
            };
            AdminCommand::new(config, session).execute(action).await?
        }
    };

    println!("{}", output);

    Ok(())
}
