//! Product and stock lookups with timeouts and retries.
//!
//! This crate provides:
//! - `CatalogClient` - The two lookups the cart needs: product metadata and stock
//! - `HttpCatalogClient` - `reqwest` implementation against the inventory REST API
//! - `ResilientClient` - Wraps any client with a `FetchPolicy`
//! - `TimeoutConfig` - Per-attempt timeouts
//! - `RetryPolicy` - Retry strategies

mod client;
mod error;
mod http;
mod resilient;
mod retry;
mod timeout;

pub use client::*;
pub use error::*;
pub use http::*;
pub use resilient::*;
pub use retry::*;
pub use timeout::*;
