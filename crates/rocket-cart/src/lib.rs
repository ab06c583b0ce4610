//! Stock-validated shopping cart manager for RocketShoes.
//!
//! [`CartManager`] owns the cart, checks every mutation against a live stock
//! lookup, persists the result after each successful change, and reports
//! failures to a [`Notifier`]. Collaborators are injected; there is no global
//! cart.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocket_cart::prelude::*;
//!
//! let config = CartConfig::load("rocket.toml")?;
//! let manager = CartManager::from_config(&config, Arc::new(TracingNotifier))?;
//!
//! manager.add_product(ProductId::new(1)).await?;
//! manager
//!     .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
//!     .await?;
//! manager.remove_product(ProductId::new(1)).await?;
//!
//! println!("{} items", manager.cart().await.item_count());
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod notifier;
pub mod repository;

pub use config::{CartConfig, ConfigError};
pub use error::ManagerError;
pub use manager::{CartManager, CartOperation, MissingItemPolicy, UpdateProductAmount};
pub use notifier::{NotificationMessages, Notifier, RecordingNotifier, TracingNotifier};
pub use repository::CartRepository;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::ManagerError;
    pub use crate::manager::{CartManager, MissingItemPolicy, UpdateProductAmount};
    pub use crate::notifier::{Notifier, RecordingNotifier, TracingNotifier};
    pub use crate::repository::CartRepository;

    pub use rocket_core::prelude::*;
    pub use rocket_data::{CatalogClient, FetchError};
    pub use rocket_store::Cache;
}
