//! Product metadata.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by `GET /products/{id}`.
///
/// Price is carried for display only; the cart never computes totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a product record.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}
