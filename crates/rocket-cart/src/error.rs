//! Manager error types.

use rocket_core::CartError;
use rocket_data::FetchError;
use rocket_store::StoreError;
use thiserror::Error;

/// Why a cart operation left the cart unchanged.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// A stock or quantity rule rejected the mutation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Product or stock lookup failed (network, timeout, bad payload).
    #[error("Lookup failed: {0}")]
    Transport(#[from] FetchError),

    /// The new cart could not be persisted.
    #[error("Storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl ManagerError {
    /// Requested quantity exceeds available stock.
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, Self::Cart(CartError::OutOfStock { .. }))
    }

    /// Target quantity was zero or negative.
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::Cart(CartError::InvalidAmount { .. }))
    }

    /// Product is not in the cart.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Cart(CartError::NotFound(_)))
    }

    /// Lookup failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
