//! Cart rule violations.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors raised when a cart mutation breaks a stock or quantity rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Requested quantity exceeds the stock available for the product.
    #[error("Out of stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Target quantity is zero or negative.
    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Product already has a line item.
    #[error("Product already in cart: {0}")]
    AlreadyInCart(ProductId),
}

impl CartError {
    /// Product the error refers to.
    pub fn product_id(&self) -> ProductId {
        match self {
            CartError::OutOfStock { product_id, .. }
            | CartError::InvalidAmount { product_id, .. } => *product_id,
            CartError::NotFound(id) | CartError::AlreadyInCart(id) => *id,
        }
    }
}
