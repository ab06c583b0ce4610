//! `reqwest` client for the inventory REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use rocket_core::{catalog::Product, catalog::Stock, ProductId};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{CatalogClient, FetchError, Resource, TimeoutConfig};

/// Single-attempt client for `GET {base}/products/{id}` and `GET {base}/stock/{id}`.
///
/// Wrap it in a [`ResilientClient`](crate::ResilientClient) for retries.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    timeout: TimeoutConfig,
}

impl HttpCatalogClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, resource: Resource, id: ProductId) -> String {
        format!("{}/{}/{}", self.base_url, resource.path(), id)
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: ProductId,
    ) -> Result<T, FetchError> {
        let url = self.url_for(resource, id);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;
        debug!(%url, bytes = body.len(), "lookup succeeded");
        Ok(serde_json::from_slice(&body)?)
    }

    fn map_transport(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.total)
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.get_json(Resource::Product, id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.get_json(Resource::Stock, id).await
    }
}
