//! Stock levels.

use crate::error::CartError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available quantity for a product, as returned by `GET /stock/{id}`.
///
/// Always fetched fresh before a mutation; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product identifier.
    pub id: ProductId,
    /// Quantity available. May be zero or negative when the source oversold.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if nothing is available.
    pub fn is_out_of_stock(&self) -> bool {
        self.amount <= 0
    }

    /// Check if a specific quantity can be held in the cart.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        !self.is_out_of_stock() && quantity <= self.amount
    }

    /// Fail with `OutOfStock` unless `quantity` can be fulfilled.
    pub fn ensure(&self, quantity: i64) -> Result<(), CartError> {
        if self.can_fulfill(quantity) {
            Ok(())
        } else {
            Err(CartError::OutOfStock {
                product_id: self.id,
                requested: quantity,
                available: self.amount,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_availability() {
        let stock = Stock::new(ProductId::new(1), 5);
        assert!(!stock.is_out_of_stock());
        assert!(stock.can_fulfill(5));
        assert!(!stock.can_fulfill(6));
    }

    #[test]
    fn test_empty_and_negative_stock() {
        assert!(Stock::new(ProductId::new(1), 0).is_out_of_stock());
        assert!(Stock::new(ProductId::new(1), -2).is_out_of_stock());
        assert!(!Stock::new(ProductId::new(1), -2).can_fulfill(-3));
    }

    #[test]
    fn test_ensure_reports_quantities() {
        let err = Stock::new(ProductId::new(4), 2).ensure(3).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: ProductId::new(4),
                requested: 3,
                available: 2,
            }
        );
    }
}
