//! Cart persistence.

use rocket_core::cart::{Cart, LineItem};
use rocket_store::{cache_key, Cache, StoreError};
use tracing::{debug, warn};

/// Default storage namespace.
pub const DEFAULT_NAMESPACE: &str = "@RocketShoes";

/// Loads and saves the cart under a single key.
///
/// The value is the whole cart as a JSON array, overwritten on every save.
#[derive(Debug, Clone)]
pub struct CartRepository {
    cache: Cache,
    key: String,
}

impl CartRepository {
    /// Store the cart under `<namespace>:cart`.
    pub fn new(cache: Cache, namespace: &str) -> Self {
        Self::with_key(cache, cache_key!(namespace, "cart"))
    }

    /// Store the cart under an explicit key.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored cart, or an empty one if nothing is stored.
    ///
    /// Duplicate ids and non-positive amounts in the stored value are dropped.
    pub fn load(&self) -> Result<Cart, StoreError> {
        let Some(items) = self.cache.get::<Vec<LineItem>>(&self.key)? else {
            debug!(key = %self.key, "no stored cart");
            return Ok(Cart::new());
        };

        let (cart, report) = Cart::from_items(items);
        if !report.is_clean() {
            warn!(
                key = %self.key,
                duplicates = ?report.duplicates,
                invalid_amounts = ?report.invalid_amounts,
                "discarded invalid line items from stored cart"
            );
        }
        debug!(key = %self.key, items = cart.len(), "loaded cart");
        Ok(cart)
    }

    /// Overwrite the stored cart.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        self.cache.set(&self.key, cart)
    }
}
