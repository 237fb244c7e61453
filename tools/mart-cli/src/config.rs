//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use mart_auth::{IdentityConfig, DEFAULT_IDENTITY_KEY};
use mart_commerce::store::{StoreConfig, DEFAULT_CART_KEY};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `storage.dir`.
pub const STORAGE_DIR_ENV: &str = "MART_STORAGE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.storage.dir = dir;
            }
        }
        self
    }

    /// Cart store settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            cart_key: self.storage.cart_key.clone(),
        }
    }

    /// Identity lookup settings.
    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            identity_key: self.storage.identity_key.clone(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Where and under which keys state is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file store, relative to the working directory.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Key holding the cart.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Key holding the signed-in identity.
    #[serde(default = "default_identity_key")]
    pub identity_key: String,
}

fn default_dir() -> String {
    ".mart".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_identity_key() -> String {
    DEFAULT_IDENTITY_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            cart_key: default_cart_key(),
            identity_key: default_identity_key(),
        }
    }
}

/// Contents written by `mart config init`.
pub fn generate_default_config() -> String {
    format!(
        r#"# Marketplace cart configuration

[storage]
dir = "{dir}"
cart_key = "{cart}"
identity_key = "{user}"
"#,
        dir = default_dir(),
        cart = DEFAULT_CART_KEY,
        user = DEFAULT_IDENTITY_KEY,
    )
}
