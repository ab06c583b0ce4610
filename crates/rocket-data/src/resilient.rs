//! Timeout and retry wrapper for any catalog client.

use std::future::Future;

use async_trait::async_trait;
use rocket_core::{catalog::Product, catalog::Stock, ProductId};
use tracing::{debug, warn};

use crate::{CatalogClient, FetchError, Resource, RetryPolicy, TimeoutConfig};

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Timeout configuration, applied per attempt.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }

    /// Run `attempt` until it succeeds, fails permanently, or retries run out.
    ///
    /// Each attempt is bounded by `timeout.total`; expiry becomes
    /// [`FetchError::Timeout`] and is retried like any transient failure.
    pub async fn run<T, F, Fut>(&self, label: &str, mut attempt: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut retries = 0;
        loop {
            let result = match tokio::time::timeout(self.timeout.total, attempt()).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(self.timeout.total)),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if self.retry.should_retry(&e, retries) => {
                    let delay = self.retry.backoff.delay_for_attempt(retries);
                    warn!(lookup = label, error = %e, retry = retries + 1, ?delay, "lookup failed, retrying");
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Err(e) => {
                    debug!(lookup = label, error = %e, retries, "lookup failed");
                    return Err(e);
                }
            }
        }
    }
}

/// Applies a [`FetchPolicy`] to every lookup of an inner client.
#[derive(Debug, Clone)]
pub struct ResilientClient<C> {
    inner: C,
    policy: FetchPolicy,
}

impl<C: CatalogClient> ResilientClient<C> {
    /// Wrap a client.
    pub fn new(inner: C, policy: FetchPolicy) -> Self {
        Self { inner, policy }
    }

    /// Policy in effect.
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Unwrap the inner client.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[async_trait]
impl<C: CatalogClient> CatalogClient for ResilientClient<C> {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.policy
            .run(Resource::Product.path(), || self.inner.product(id))
            .await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.policy
            .run(Resource::Stock.path(), || self.inner.stock(id))
            .await
    }
}
