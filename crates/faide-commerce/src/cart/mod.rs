//! Shopping cart module.
//!
//! Contains line items, the cart state with its merge and quantity rules,
//! the persisted wire shape, and the write-through store.

mod line_item;
mod persist;
mod state;
mod store;

pub use line_item::{
    sanitize_quantity, sanitize_quantity_f64, CartCandidate, LineItem, MAX_QUANTITY_PER_ITEM,
};
pub use persist::{decode, encode, RestoreError, StoredLineItem};
pub use state::{CartState, DecrementPolicy, QuantityChange};
pub use store::{CartStore, CartStoreConfig, DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY};
