//! Type-safe local key-value storage for RocketShoes.
//!
//! Provides a simple, ergonomic API for persisting data in a local key-value
//! store with automatic JSON serialization. Two backends are included:
//! [`MemoryStore`] for tests and ephemeral sessions, and [`FileStore`] which
//! keeps one file per key and overwrites it atomically.
//!
//! # Example
//!
//! ```rust
//! use rocket_store::{cache_key, Cache};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Item {
//!     id: u64,
//!     amount: i64,
//! }
//!
//! let cache = Cache::in_memory();
//! let key = cache_key!("@RocketShoes", "cart");
//!
//! cache.set(&key, &vec![Item { id: 1, amount: 2 }]).unwrap();
//! let items: Option<Vec<Item>> = cache.get(&key).unwrap();
//! assert_eq!(items.unwrap()[0].amount, 2);
//!
//! cache.delete(&key).unwrap();
//! assert!(!cache.exists(&key).unwrap());
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, FileStore, KeyValueStore, MemoryStore, StoreError};
}
