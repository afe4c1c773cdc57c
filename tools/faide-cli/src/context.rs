//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use faide_cache::FileStore;
use faide_commerce::catalog::Catalog;
use faide_commerce::media::FsImageProbe;
use faide_commerce::CartStore;

use crate::config::{FaideConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: FaideConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (FaideConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (FaideConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(FaideConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match FaideConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %format!("{:#}", e), "skipping config");
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| self.resolve_path(&p.to_string_lossy()))
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Resolve a config-relative path.
    fn resolve_config_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.resolve_config_path(&self.config.store.dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart store: {}", dir.display()))?;

        let mut cart = CartStore::with_config(store, self.config.store.cart_store_config());

        let output = self.output.clone();
        cart.subscribe(move |state| {
            output.debug(&format!("cart now holds {} item(s)", state.total_quantity()));
        });

        Ok(cart)
    }

    /// The configured catalog, or the built-in range.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_config_path(path);
                Catalog::from_path(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Ok(Catalog::seed()),
        }
    }

    /// Probe rooted at the configured images directory.
    pub fn image_probe(&self) -> FsImageProbe {
        FsImageProbe::new(self.resolve_config_path(&self.config.media.images_dir))
    }
}
