//! The cart manager.

use std::fmt;
use std::sync::Arc;

use rocket_core::cart::{Cart, LineItem};
use rocket_core::{CartError, ProductId, Stock};
use rocket_data::{CatalogClient, FetchError, Resource};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::error::ManagerError;
use crate::notifier::{NotificationMessages, Notifier};
use crate::repository::CartRepository;

/// What to do when asked to remove a product that is not in the cart.
///
/// Either way the call returns [`CartError::NotFound`] and the cart is untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingItemPolicy {
    /// Report the failure through the notifier.
    #[default]
    Notify,
    /// Stay silent.
    Ignore,
}

/// The three mutations, used to pick the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::UpdateAmount => write!(f, "update_amount"),
        }
    }
}

/// Request to set a line item to an absolute quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Target quantity, not a delta.
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Owns the cart and applies stock-validated mutations to it.
///
/// Each mutation runs with the cart locked, from the first lookup until the
/// new cart is persisted, so concurrent callers are serialized. A mutation
/// either persists and publishes a new cart or leaves both copies untouched.
/// Failures are reported to the notifier and returned to the caller.
pub struct CartManager {
    catalog: Arc<dyn CatalogClient>,
    repository: CartRepository,
    notifier: Arc<dyn Notifier>,
    messages: NotificationMessages,
    missing_item: MissingItemPolicy,
    cart: Mutex<Cart>,
}

impl CartManager {
    /// Create a manager, restoring the cart from `repository`.
    pub fn open(
        catalog: Arc<dyn CatalogClient>,
        repository: CartRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ManagerError> {
        let cart = repository.load()?;
        info!(key = repository.key(), items = cart.len(), "cart restored");

        Ok(Self {
            catalog,
            repository,
            notifier,
            messages: NotificationMessages::default(),
            missing_item: MissingItemPolicy::default(),
            cart: Mutex::new(cart),
        })
    }

    /// Set the policy for removing products that are not in the cart.
    pub fn with_missing_item_policy(mut self, policy: MissingItemPolicy) -> Self {
        self.missing_item = policy;
        self
    }

    /// Set the notification texts.
    pub fn with_messages(mut self, messages: NotificationMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Policy for removing products that are not in the cart.
    pub fn missing_item_policy(&self) -> MissingItemPolicy {
        self.missing_item
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched and appended with amount 1;
    /// otherwise its amount is incremented. Fails with `OutOfStock` when stock
    /// is exhausted or already fully held.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<LineItem, ManagerError> {
        let result = self.try_add(product_id).await;
        self.settle(CartOperation::Add, result)
    }

    /// Remove a product's line item.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<LineItem, ManagerError> {
        let result = self.try_remove(product_id).await;
        self.settle(CartOperation::Remove, result)
    }

    /// Set a product's amount to an absolute value.
    #[instrument(skip_all, fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(
        &self,
        update: UpdateProductAmount,
    ) -> Result<LineItem, ManagerError> {
        let result = self.try_update(update).await;
        self.settle(CartOperation::UpdateAmount, result)
    }

    async fn try_add(&self, product_id: ProductId) -> Result<LineItem, ManagerError> {
        let mut cart = self.cart.lock().await;
        let stock = self.fetch_stock(product_id).await?;
        stock.ensure(1)?;

        let mut next = cart.clone();
        if next.contains(product_id) {
            next.increment(product_id, &stock)?;
        } else {
            let product = self.catalog.product(product_id).await?;
            ensure_same_id(Resource::Product, product_id, product.id)?;
            next.add(product)?;
        }

        self.commit(&mut cart, next, product_id)
    }

    async fn try_remove(&self, product_id: ProductId) -> Result<LineItem, ManagerError> {
        let mut cart = self.cart.lock().await;
        let mut next = cart.clone();
        let removed = next.remove(product_id)?;

        self.repository.save(&next)?;
        *cart = next;
        debug!(remaining = cart.len(), "cart persisted");
        Ok(removed)
    }

    async fn try_update(&self, update: UpdateProductAmount) -> Result<LineItem, ManagerError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount <= 0 {
            return Err(CartError::InvalidAmount { product_id, amount }.into());
        }

        let mut cart = self.cart.lock().await;
        let stock = self.fetch_stock(product_id).await?;

        let mut next = cart.clone();
        next.set_amount(product_id, amount, &stock)?;

        self.commit(&mut cart, next, product_id)
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        let stock = self.catalog.stock(product_id).await?;
        ensure_same_id(Resource::Stock, product_id, stock.id)?;
        Ok(stock)
    }

    /// Persist `next`, then publish it. Returns the line item for `product_id`.
    fn commit(
        &self,
        cart: &mut MutexGuard<'_, Cart>,
        next: Cart,
        product_id: ProductId,
    ) -> Result<LineItem, ManagerError> {
        let item = next
            .get(product_id)
            .cloned()
            .ok_or(CartError::NotFound(product_id))?;

        self.repository.save(&next)?;
        **cart = next;
        debug!(amount = item.amount, items = cart.len(), "cart persisted");
        Ok(item)
    }

    /// Report a failed operation and hand the result back.
    fn settle(
        &self,
        operation: CartOperation,
        result: Result<LineItem, ManagerError>,
    ) -> Result<LineItem, ManagerError> {
        if let Err(e) = &result {
            if operation == CartOperation::Remove
                && e.is_not_found()
                && self.missing_item == MissingItemPolicy::Ignore
            {
                debug!(%operation, error = %e, "ignored missing line item");
            } else {
                warn!(%operation, error = %e, "cart operation rejected");
                self.notifier.report_error(self.message_for(operation, e));
            }
        }
        result
    }

    fn message_for(&self, operation: CartOperation, error: &ManagerError) -> &str {
        if error.is_out_of_stock() {
            return &self.messages.out_of_stock;
        }
        if error.is_invalid_amount() {
            return &self.messages.invalid_amount;
        }
        match operation {
            CartOperation::Add => &self.messages.add_failed,
            CartOperation::Remove => &self.messages.remove_failed,
            CartOperation::UpdateAmount => &self.messages.update_failed,
        }
    }
}

/// Reject a lookup answered with a record for another product.
fn ensure_same_id(
    resource: Resource,
    requested: ProductId,
    received: ProductId,
) -> Result<(), FetchError> {
    if requested == received {
        return Ok(());
    }
    Err(FetchError::Deserialization(format!(
        "requested {} {} but received {}",
        resource, requested, received
    )))
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("repository", &self.repository)
            .field("missing_item", &self.missing_item)
            .finish_non_exhaustive()
    }
}
