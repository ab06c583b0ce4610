//! Cart configuration.
//!
//! Loaded from TOML (or JSON when the path ends in `.json`). Every field has a
//! default, so an empty file is a valid config.
//!
//! ```toml
//! [catalog]
//! base_url = "http://localhost:3333"
//! timeout_ms = 2000
//! max_retries = 1
//!
//! [storage]
//! dir = ".rocketshoes"
//! namespace = "@RocketShoes"
//!
//! [cart]
//! missing_item = "notify"
//!
//! [messages]
//! out_of_stock = "Quantidade solicitada fora de estoque"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rocket_data::{
    BackoffStrategy, FetchError, FetchPolicy, HttpCatalogClient, ResilientClient, RetryPolicy,
    TimeoutConfig,
};
use rocket_observability::LogConfig;
use rocket_store::{Cache, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::{CartManager, MissingItemPolicy};
use crate::notifier::{NotificationMessages, Notifier};
use crate::repository::{CartRepository, DEFAULT_NAMESPACE};
use crate::ManagerError;

/// Errors reading or writing a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML did not match the schema.
    #[error("Failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON did not match the schema.
    #[error("Failed to parse JSON config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Inventory API.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Local persistence.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Cart behavior.
    #[serde(default)]
    pub cart: CartSettings,

    /// Notification texts.
    #[serde(default)]
    pub messages: NotificationMessages,

    /// Log output.
    #[serde(default)]
    pub logging: LogConfig,
}

impl CartConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        };

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a manager wired to the configured API and store.
    pub fn build_manager(&self, notifier: Arc<dyn Notifier>) -> Result<CartManager, ManagerError> {
        let catalog = self.catalog.client()?;
        let repository = CartRepository::new(self.storage.open_cache()?, &self.storage.namespace);

        Ok(CartManager::open(Arc::new(catalog), repository, notifier)?
            .with_missing_item_policy(self.cart.missing_item)
            .with_messages(self.messages.clone()))
    }
}

impl CartManager {
    /// Build a manager from config. See [`CartConfig::build_manager`].
    pub fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ManagerError> {
        config.build_manager(notifier)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Inventory API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// API root, serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Time budget per attempt, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a timeout, connection failure or 5xx.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff between retries, in milliseconds; doubles each retry.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_max_retries() -> u32 {
    1
}

fn default_backoff_ms() -> u64 {
    100
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl CatalogSettings {
    /// Timeout and retry policy for lookups.
    pub fn fetch_policy(&self) -> FetchPolicy {
        let backoff = if self.backoff_ms == 0 {
            BackoffStrategy::None
        } else {
            let base = Duration::from_millis(self.backoff_ms);
            BackoffStrategy::Exponential {
                base,
                max: base.saturating_mul(8),
            }
        };

        FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms)),
            RetryPolicy::new(self.max_retries).with_backoff(backoff),
        )
    }

    /// HTTP client with the configured policy applied.
    ///
    /// Fails on an unusable base URL or a zero timeout.
    pub fn client(&self) -> Result<ResilientClient<HttpCatalogClient>, FetchError> {
        let policy = self.fetch_policy();
        let http = HttpCatalogClient::new(&self.base_url, policy.timeout)?;
        if self.timeout_ms == 0 {
            return Err(FetchError::InvalidConfig(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(ResilientClient::new(http, policy))
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory for the file store.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Key prefix; the cart lives under `<namespace>:cart`.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Keep the cart in memory only.
    #[serde(default)]
    pub in_memory: bool,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".rocketshoes")
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            namespace: default_namespace(),
            in_memory: false,
        }
    }
}

impl StorageSettings {
    /// Open the configured store.
    pub fn open_cache(&self) -> Result<Cache, StoreError> {
        if self.in_memory {
            Ok(Cache::in_memory())
        } else {
            Cache::open_dir(&self.dir)
        }
    }
}

/// Cart behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Removing a product that is not in the cart.
    #[serde(default)]
    pub missing_item: MissingItemPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingNotifier;

    #[test]
    fn test_empty_toml_is_default() {
        let config: CartConfig = toml::from_str("").unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.catalog.base_url, "http://localhost:3333");
        assert_eq!(config.storage.namespace, "@RocketShoes");
        assert_eq!(config.cart.missing_item, MissingItemPolicy::Notify);
    }

    #[test]
    fn test_parse_toml() {
        let config: CartConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "https://api.example.com"
            timeout_ms = 300
            max_retries = 0

            [cart]
            missing_item = "ignore"

            [messages]
            out_of_stock = "Quantidade solicitada fora de estoque"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.timeout_ms, 300);
        assert_eq!(config.catalog.backoff_ms, 100);
        assert_eq!(config.cart.missing_item, MissingItemPolicy::Ignore);
        assert_eq!(config.messages.out_of_stock, "Quantidade solicitada fora de estoque");
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result: Result<CartConfig, _> = toml::from_str("[cart]\nmissing_item = \"panic\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_policy() {
        let settings = CatalogSettings {
            timeout_ms: 400,
            max_retries: 2,
            backoff_ms: 50,
            ..CatalogSettings::default()
        };
        let policy = settings.fetch_policy();
        assert_eq!(policy.timeout.total, Duration::from_millis(400));
        assert_eq!(policy.retry.max_retries, 2);
        assert_eq!(
            policy.retry.backoff,
            BackoffStrategy::Exponential {
                base: Duration::from_millis(50),
                max: Duration::from_millis(400),
            }
        );

        let no_backoff = CatalogSettings {
            backoff_ms: 0,
            ..CatalogSettings::default()
        };
        assert_eq!(no_backoff.fetch_policy().retry.backoff, BackoffStrategy::None);
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CartConfig::default();
        config.catalog.base_url = "http://inventory:8080".to_string();

        for name in ["rocket.toml", "rocket.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CartConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = CartConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_build_manager_in_memory() {
        let mut config = CartConfig::default();
        config.storage.in_memory = true;
        config.cart.missing_item = MissingItemPolicy::Ignore;

        let manager = config
            .build_manager(Arc::new(RecordingNotifier::new()))
            .unwrap();
        assert_eq!(manager.missing_item_policy(), MissingItemPolicy::Ignore);
    }

    #[test]
    fn test_build_manager_rejects_bad_url() {
        let mut config = CartConfig::default();
        config.storage.in_memory = true;
        config.catalog.base_url = "nope".to_string();

        let err = config
            .build_manager(Arc::new(RecordingNotifier::new()))
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_build_manager_rejects_zero_timeout() {
        let mut config = CartConfig::default();
        config.storage.in_memory = true;
        config.catalog.timeout_ms = 0;

        let err = config
            .build_manager(Arc::new(RecordingNotifier::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Transport(FetchError::InvalidConfig(_))
        ));
    }
}
