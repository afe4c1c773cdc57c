//! Type-safe local Key-Value storage for the FAIDE storefront.
//!
//! Stands in for the browser's local storage: a flat namespace of string keys
//! holding JSON values, behind a pluggable [`KvStore`] backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use faide_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".faide")?);
//!
//! // Store a value
//! cache.set("faide_cart_v1", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<StoredLineItem>> = cache.get("faide_cart_v1")?;
//!
//! // Delete a value
//! cache.delete("faide_cart_v1")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
