//! Catalog records served by the inventory API.

mod product;
mod stock;

pub use product::Product;
pub use stock::Stock;
