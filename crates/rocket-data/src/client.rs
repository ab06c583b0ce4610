//! Catalog lookup interface.

use async_trait::async_trait;
use rocket_core::{catalog::Product, catalog::Stock, ProductId};

use crate::FetchError;

/// Source of product metadata and current stock levels.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch product metadata.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Fetch the current stock level.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;
}

#[async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for std::sync::Arc<C> {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(id).await
    }
}
