//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use faide_commerce::cart::{CartStoreConfig, DecrementPolicy, DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY};
use faide_commerce::checkout::CheckoutConfig;
use faide_commerce::media::{ProbeOptions, DEFAULT_MAX_VARIANTS, DEFAULT_PROBE_TIMEOUT};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upward.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["faide.toml", ".faide.toml", "faide.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaideConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub store: StoreConfig,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartConfig,

    /// WhatsApp handoff.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Product image discovery.
    #[serde(default)]
    pub media: MediaConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl FaideConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Persistent store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Key the cart snapshot lives under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Keys read when `cart_key` holds nothing.
    #[serde(default = "default_legacy_keys")]
    pub legacy_keys: Vec<String>,
}

fn default_store_dir() -> String {
    ".faide".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_legacy_keys() -> Vec<String> {
    vec![LEGACY_STORAGE_KEY.to_string()]
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            cart_key: default_cart_key(),
            legacy_keys: default_legacy_keys(),
        }
    }
}

impl StoreConfig {
    pub fn cart_store_config(&self) -> CartStoreConfig {
        CartStoreConfig {
            storage_key: self.cart_key.clone(),
            legacy_keys: self.legacy_keys.clone(),
        }
    }
}

/// Cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    /// What `cart dec` does at quantity 1.
    #[serde(default)]
    pub decrement_policy: DecrementPolicy,
}

/// Image probing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory site-absolute image paths are resolved against.
    #[serde(default = "default_images_dir")]
    pub images_dir: String,

    /// Per-image probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Numbered variants tried after each base image.
    #[serde(default = "default_max_variants")]
    pub max_variants: usize,
}

fn default_images_dir() -> String {
    "public".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT.as_millis() as u64
}

fn default_max_variants() -> usize {
    DEFAULT_MAX_VARIANTS
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            probe_timeout_ms: default_probe_timeout_ms(),
            max_variants: default_max_variants(),
        }
    }
}

impl MediaConfig {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            timeout: Duration::from_millis(self.probe_timeout_ms),
            max_variants: self.max_variants,
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML or JSON catalog; the built-in range is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Generate a default faide.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# FAIDE storefront configuration

[store]
dir = "{dir}"
cart_key = "{cart_key}"
legacy_keys = ["{legacy_key}"]

[cart]
# "clamp" keeps the last unit, "remove-on-zero" drops the row
decrement_policy = "clamp"

[checkout]
# International format, digits only are used
whatsapp_number = ""
greeting = "{greeting}"
base_url = "{base_url}"

[media]
images_dir = "public"
probe_timeout_ms = {timeout}
max_variants = {variants}

[catalog]
# path = "catalog.toml"
"#,
        dir = default_store_dir(),
        cart_key = DEFAULT_STORAGE_KEY,
        legacy_key = LEGACY_STORAGE_KEY,
        greeting = faide_commerce::checkout::DEFAULT_GREETING,
        base_url = faide_commerce::checkout::DEFAULT_BASE_URL,
        timeout = default_probe_timeout_ms(),
        variants = DEFAULT_MAX_VARIANTS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: FaideConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.dir, ".faide");
        assert_eq!(config.store.cart_key, "faide_cart_v1");
        assert_eq!(config.store.legacy_keys, vec!["faide_cart"]);
        assert_eq!(config.cart.decrement_policy, DecrementPolicy::Clamp);
        assert_eq!(config.checkout.base_url, "https://wa.me");
        assert_eq!(config.media.probe_options().timeout, Duration::from_millis(900));
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: FaideConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.media.max_variants, 3);
        assert_eq!(
            config.checkout.greeting,
            "Hi FAIDE! I'd like to place an order:"
        );
    }

    #[test]
    fn test_partial_sections() {
        let config: FaideConfig = toml::from_str(
            r#"
            [cart]
            decrement_policy = "remove-on-zero"

            [checkout]
            whatsapp_number = "+27 82 000 0000"
            "#,
        )
        .unwrap();

        assert_eq!(config.cart.decrement_policy, DecrementPolicy::RemoveOnZero);
        assert_eq!(config.checkout.normalized_number().unwrap(), "27820000000");
        assert_eq!(config.checkout.base_url, "https://wa.me");
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faide.json");
        let path = path.to_str().unwrap();

        let mut config = FaideConfig::default();
        config.store.dir = "carts".to_string();
        std::fs::write(path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = FaideConfig::load(path).unwrap();
        assert_eq!(loaded.store.dir, "carts");
        assert_eq!(loaded.store.cart_store_config().storage_key, "faide_cart_v1");
    }
}
