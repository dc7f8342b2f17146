//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::session::Role;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote product store
    #[serde(default)]
    pub store_url: Option<String>,

    /// Bearer token for the remote product store
    #[serde(default)]
    pub api_key: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout for the remote store in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// JSON catalogue file used when no remote store is configured
    #[serde(default)]
    pub catalogue_file: Option<PathBuf>,

    /// Products per result page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Signed-in user id
    #[serde(default)]
    pub user: Option<String>,

    /// Role of the signed-in user
    #[serde(default)]
    pub role: Role,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    crate::query::DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: None,
            api_key: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            catalogue_file: None,
            page_size: default_page_size(),
            format: OutputFormat::Table,
            user: None,
            role: Role::Customer,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("catalogue.toml");
        if local_config.exists() {
            debug!("Found catalogue.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalogue").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("CATALOGUE_STORE_URL") {
            self.store_url = Some(url).filter(|u| !u.is_empty());
        }

        if let Ok(key) = std::env::var("CATALOGUE_API_KEY") {
            self.api_key = Some(key).filter(|k| !k.is_empty());
        }

        if let Ok(file) = std::env::var("CATALOGUE_FILE") {
            self.catalogue_file = Some(PathBuf::from(file));
        }

        if let Ok(user) = std::env::var("CATALOGUE_USER") {
            self.user = Some(user).filter(|u| !u.is_empty());
        }

        if let Ok(size) = std::env::var("CATALOGUE_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.page_size = s;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
