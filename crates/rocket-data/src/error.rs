//! Lookup error types.

use std::fmt;
use std::time::Duration;

use rocket_core::ProductId;
use thiserror::Error;

/// The two resources served by the inventory API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `GET /products/{id}`
    Product,
    /// `GET /stock/{id}`
    Stock,
}

impl Resource {
    /// URL path segment.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Stock => "stock",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Stock => write!(f, "stock"),
        }
    }
}

/// Errors that can occur during a lookup.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The API has no record for the id.
    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: ProductId },

    /// Non-success HTTP status.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// Attempt exceeded its time budget.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Could not reach the API.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Base URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client settings cannot be used.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Any other transport failure.
    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    /// Check if another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Http { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}
