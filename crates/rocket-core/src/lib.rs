//! Cart domain types and stock rules for RocketShoes.
//!
//! This crate has no I/O. It provides:
//!
//! - **Catalog**: `Product` metadata and `Stock` levels as served by the inventory API
//! - **Cart**: the ordered, id-unique list of `LineItem`s and the rules for mutating it
//!
//! # Example
//!
//! ```rust
//! use rocket_core::prelude::*;
//!
//! let mut cart = Cart::new();
//! let product = Product::new(ProductId::new(1), "Tênis de Caminhada", 179.9, "https://img/1.jpg");
//! cart.add(product).unwrap();
//!
//! let stock = Stock::new(ProductId::new(1), 3);
//! cart.increment(ProductId::new(1), &stock).unwrap();
//! assert_eq!(cart.get(ProductId::new(1)).unwrap().amount, 2);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, LineItem, NormalizeReport};
pub use catalog::{Product, Stock};
pub use error::CartError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem, NormalizeReport};
    pub use crate::catalog::{Product, Stock};
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
}
