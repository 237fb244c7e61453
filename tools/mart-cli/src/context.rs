//! CLI execution context.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use mart_auth::LocalIdentityProvider;
use mart_cache::{Cache, FileBackend};
use mart_commerce::store::CartStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
const CONFIG_NAMES: [&str; 3] = ["mart.toml", ".mart.toml", "mart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    storage_dir: PathBuf,
    cache: OnceCell<Cache<FileBackend>>,
}

impl Context {
    /// Load config. Local storage is opened on first use.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CliConfig::load(Path::new(path))?,
            None => Self::find_config(&cwd).unwrap_or_default(),
        }
        .with_env_overrides();

        Ok(Self::new(config, output, cwd))
    }

    pub(crate) fn new(config: CliConfig, output: Output, cwd: PathBuf) -> Self {
        let storage_dir = resolve_path(&cwd, &config.storage.dir);
        Self {
            config,
            output,
            cwd,
            storage_dir,
            cache: OnceCell::new(),
        }
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES.iter().find_map(|name| {
                let path = dir.join(name);
                if !path.is_file() {
                    return None;
                }
                match CliConfig::load(&path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping config");
                        None
                    }
                }
            })
        })
    }

    /// Open local storage, creating the directory on first use.
    fn cache(&self) -> Result<Cache<FileBackend>> {
        if let Some(cache) = self.cache.get() {
            return Ok(cache.clone());
        }
        let backend = FileBackend::open(&self.storage_dir).with_context(|| {
            format!("Failed to open storage at {}", self.storage_dir.display())
        })?;
        tracing::debug!(dir = %backend.dir().display(), "using file storage");
        Ok(self.cache.get_or_init(|| Cache::new(backend)).clone())
    }

    /// Cart store over local storage.
    pub fn cart_store(&self) -> Result<CartStore<FileBackend>> {
        Ok(CartStore::with_config(self.cache()?, self.config.store_config()))
    }

    /// Identity lookup over local storage.
    pub fn identity(&self) -> Result<LocalIdentityProvider<FileBackend>> {
        Ok(LocalIdentityProvider::with_config(
            self.cache()?,
            self.config.identity_config(),
        ))
    }

    /// The storage directory in use.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
