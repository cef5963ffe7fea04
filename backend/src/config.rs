//! Configuration management for the Flameworker inventory backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FLAMEWORKER_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::ImportPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Catalog source configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Snapshot import configuration
    pub import: ImportConfig,

    /// Inventory view configuration
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Catalog file (.json or .csv); an empty catalog is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Policy used when a request does not name one
    pub default_policy: ImportPolicy,

    /// Largest snapshot payload accepted, in bytes
    pub max_snapshot_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// On-hand total below which an item counts as low stock
    pub low_quantity_threshold: Decimal,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FLAMEWORKER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("import.default_policy", ImportPolicy::AddNewOnly.as_str())?
            .set_default("import.max_snapshot_bytes", 10 * 1024 * 1024)?
            .set_default("inventory.low_quantity_threshold", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLAMEWORKER_IMPORT__DEFAULT_POLICY, ...)
            .add_source(
                Environment::with_prefix("FLAMEWORKER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_policy: ImportPolicy::AddNewOnly,
            max_snapshot_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_quantity_threshold: Decimal::from(5),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            catalog: CatalogConfig::default(),
            import: ImportConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }
}
