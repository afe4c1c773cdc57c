//! Write-through cart store.

use faide_cache::{Cache, KvStore};

use crate::cart::persist::{self, StoredLineItem};
use crate::cart::{CartCandidate, CartState, DecrementPolicy, LineItem};
use crate::ids::LineItemKey;
use crate::money::Money;

/// Storage key for the current cart snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "faide_cart_v1";

/// Key used by earlier storefront builds.
pub const LEGACY_STORAGE_KEY: &str = "faide_cart";

/// Where a [`CartStore`] keeps its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartStoreConfig {
    /// Key the cart is read from and written to.
    pub storage_key: String,
    /// Keys tried, in order, when `storage_key` holds nothing.
    pub legacy_keys: Vec<String>,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            legacy_keys: vec![LEGACY_STORAGE_KEY.to_string()],
        }
    }
}

type Listener = Box<dyn FnMut(&CartState)>;

/// Owns the cart and keeps the persistent store in sync with it.
///
/// Every mutation is written through to the store before it returns, then
/// handed to subscribers. Store failures never surface: they are logged and
/// the in-memory cart stays authoritative for the rest of the session.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = CartStore::open(FileStore::open(".faide")?);
/// store.subscribe(|cart| render_badge(cart.total_quantity()));
///
/// let state = store.add_item(selection.to_candidate()?);
/// println!("{} items", state.total_quantity());
/// ```
pub struct CartStore<S> {
    cache: Cache<S>,
    config: CartStoreConfig,
    state: CartState,
    listeners: Vec<Listener>,
}

impl<S: KvStore> CartStore<S> {
    /// Open with the default keys and restore the saved cart.
    pub fn open(store: S) -> Self {
        Self::with_config(store, CartStoreConfig::default())
    }

    /// Open with explicit keys and restore the saved cart.
    pub fn with_config(store: S, config: CartStoreConfig) -> Self {
        let mut this = Self {
            cache: Cache::new(store),
            config,
            state: CartState::new(),
            listeners: Vec::new(),
        };
        this.state = this.load();
        this
    }

    /// Read the saved cart.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart. When
    /// the primary key is absent, legacy keys are tried and a cart found there
    /// is copied to the primary key.
    pub fn load(&self) -> CartState {
        if let Some(state) = self.read_key(&self.config.storage_key) {
            return state;
        }

        for legacy in &self.config.legacy_keys {
            if let Some(state) = self.read_key(legacy) {
                tracing::info!(from = %legacy, to = %self.config.storage_key, items = state.len(), "migrating legacy cart");
                self.save(&state);
                return state;
            }
        }

        CartState::new()
    }

    /// `None` only when the key holds nothing; unreadable data is an empty cart.
    fn read_key(&self, key: &str) -> Option<CartState> {
        match self.cache.get::<Vec<serde_json::Value>>(key) {
            Ok(Some(records)) => Some(persist::decode(records)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable cart snapshot");
                Some(CartState::new())
            }
        }
    }

    /// Write a snapshot, overwriting what was there. Failures are logged only.
    pub fn save(&self, state: &CartState) {
        let records: Vec<StoredLineItem> = persist::encode(state);
        if let Err(e) = self.cache.set(&self.config.storage_key, &records) {
            tracing::warn!(key = %self.config.storage_key, error = %e, "cart not persisted");
        }
    }

    /// Discard in-memory state and re-read the store.
    pub fn reload(&mut self) -> &CartState {
        self.state = self.load();
        &self.state
    }

    /// Current cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn get(&self, key: &LineItemKey) -> Option<&LineItem> {
        self.state.get(key)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn config(&self) -> &CartStoreConfig {
        &self.config
    }

    /// Borrow the backing store.
    pub fn backend(&self) -> &S {
        self.cache.store()
    }

    /// Register a callback that receives the cart after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add a candidate, merging with an existing row of the same key.
    ///
    /// A merge into a row already at the cap writes nothing.
    pub fn add_item(&mut self, candidate: CartCandidate) -> &CartState {
        let (key, change) = self.state.merge_candidate(candidate);
        tracing::debug!(%key, ?change, "added to cart");
        if change.is_mutation() {
            self.commit()
        } else {
            &self.state
        }
    }

    /// Add `delta` to a row's quantity under an explicit policy.
    pub fn update_quantity(
        &mut self,
        key: &LineItemKey,
        delta: i64,
        policy: DecrementPolicy,
    ) -> &CartState {
        let change = self.state.update_quantity(key, delta, policy);
        tracing::debug!(%key, delta, policy = policy.as_str(), ?change, "quantity change");
        if change.is_mutation() {
            self.commit()
        } else {
            &self.state
        }
    }

    /// Increase a row's quantity (capped).
    pub fn increment(&mut self, key: &LineItemKey, by: u32) -> &CartState {
        self.update_quantity(key, i64::from(by), DecrementPolicy::Clamp)
    }

    /// Decrease a row's quantity, never below 1.
    pub fn decrement_clamped(&mut self, key: &LineItemKey, by: u32) -> &CartState {
        self.update_quantity(key, -i64::from(by), DecrementPolicy::Clamp)
    }

    /// Decrease a row's quantity, removing it when it reaches 0.
    pub fn decrement_or_remove(&mut self, key: &LineItemKey, by: u32) -> &CartState {
        self.update_quantity(key, -i64::from(by), DecrementPolicy::RemoveOnZero)
    }

    /// Remove a row; unknown keys are ignored.
    pub fn remove_item(&mut self, key: &LineItemKey) -> &CartState {
        if self.state.remove_item(key) {
            tracing::debug!(%key, "removed from cart");
            self.commit()
        } else {
            &self.state
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &CartState {
        self.state.clear();
        tracing::debug!("cart cleared");
        self.commit()
    }

    pub fn total_quantity(&self) -> u64 {
        self.state.total_quantity()
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    fn commit(&mut self) -> &CartState {
        self.save(&self.state);
        for listener in &mut self.listeners {
            listener(&self.state);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Size;
    use crate::ids::ProductId;
    use faide_cache::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn tee(qty: i64) -> CartCandidate {
        CartCandidate {
            product_id: ProductId::new("tee"),
            name: "FAIDE Tee".to_string(),
            unit_price: Money::from_major(799),
            size: Size::M,
            color: Some("Black".to_string()),
            image: "/images/tshirt.png".to_string(),
            quantity: qty,
        }
    }

    fn hoodie() -> CartCandidate {
        CartCandidate {
            product_id: ProductId::new("hoodie"),
            name: "FAIDE Hoodie".to_string(),
            unit_price: Money::from_major(1499),
            size: Size::L,
            color: None,
            image: "/images/hoodie.png".to_string(),
            quantity: 1,
        }
    }

    #[test]
    fn test_open_empty_store() {
        let store = CartStore::open(MemoryStore::new());
        assert!(store.state().is_empty());
        assert_eq!(store.total_quantity(), 0);
    }

    #[test]
    fn test_mutations_write_through() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = CartStore::open(Arc::clone(&backend));
        store.add_item(tee(1));
        store.add_item(tee(2));

        let reopened = CartStore::open(Arc::clone(&backend));
        assert_eq!(reopened.state(), store.state());
        assert_eq!(reopened.total_quantity(), 3);
        assert_eq!(reopened.total_price(), Money::from_major(2397));
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let backend = MemoryStore::new();
        backend.set(DEFAULT_STORAGE_KEY, b"{not valid").unwrap();

        let store = CartStore::open(backend);
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_non_array_snapshot_loads_empty() {
        let backend = MemoryStore::new();
        backend.set(DEFAULT_STORAGE_KEY, br#"{"items": []}"#).unwrap();
        assert!(CartStore::open(backend).state().is_empty());
    }

    #[test]
    fn test_quota_failure_keeps_memory_state() {
        let mut store = CartStore::open(MemoryStore::with_quota(16));
        store.add_item(tee(1));
        store.add_item(hoodie());

        assert_eq!(store.total_quantity(), 2);
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_legacy_key_is_migrated() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(
                LEGACY_STORAGE_KEY,
                br#"[{"key":"tee_M","id":"tee","name":"FAIDE Tee","size":"M","price":799,"image":"/images/tshirt.png","qty":2}]"#,
            )
            .unwrap();

        let store = CartStore::open(Arc::clone(&backend));
        assert_eq!(store.total_quantity(), 2);
        assert!(backend.exists(DEFAULT_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_primary_key_wins_over_legacy() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(DEFAULT_STORAGE_KEY, b"[]").unwrap();
        backend
            .set(
                LEGACY_STORAGE_KEY,
                br#"[{"id":"tee","name":"FAIDE Tee","size":"M","price":799,"qty":2}]"#,
            )
            .unwrap();

        assert!(CartStore::open(backend).state().is_empty());
    }

    #[test]
    fn test_custom_storage_key() {
        let backend = Arc::new(MemoryStore::new());
        let config = CartStoreConfig {
            storage_key: "shop_cart".to_string(),
            legacy_keys: Vec::new(),
        };
        let mut store = CartStore::with_config(Arc::clone(&backend), config);
        store.add_item(hoodie());

        assert!(backend.exists("shop_cart").unwrap());
        assert!(!backend.exists(DEFAULT_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_subscribers_see_post_mutation_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = CartStore::open(MemoryStore::new());
        store.subscribe(move |cart| sink.borrow_mut().push(cart.total_quantity()));

        let key = tee(1).key();
        store.add_item(tee(1));
        store.increment(&key, 2);
        store.decrement_clamped(&key, 5);
        store.decrement_clamped(&key, 1); // no-op at 1, no notification
        store.clear();

        assert_eq!(*seen.borrow(), vec![1, 3, 1, 0]);
    }

    #[test]
    fn test_add_at_cap_does_not_write() {
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);

        let backend = Arc::new(MemoryStore::new());
        let mut store = CartStore::open(Arc::clone(&backend));
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.add_item(tee(99));
        assert_eq!(*notified.borrow(), 1);

        backend.delete(DEFAULT_STORAGE_KEY).unwrap();
        store.add_item(tee(1));

        assert_eq!(store.total_quantity(), 99);
        assert_eq!(*notified.borrow(), 1);
        assert!(!backend.exists(DEFAULT_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_decrement_policies() {
        let mut store = CartStore::open(MemoryStore::new());
        let key = tee(1).key();

        store.add_item(tee(1));
        store.decrement_clamped(&key, 1);
        assert_eq!(store.state().get(&key).unwrap().quantity, 1);

        store.decrement_or_remove(&key, 1);
        assert!(!store.state().contains(&key));
    }

    #[test]
    fn test_clear_then_reload_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = CartStore::open(Arc::clone(&backend));
        store.add_item(tee(1));
        store.add_item(hoodie());
        store.clear();

        assert_eq!(store.total_quantity(), 0);
        assert!(store.total_price().is_zero());
        assert!(store.reload().is_empty());
        assert_eq!(backend.get(DEFAULT_STORAGE_KEY).unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_remove_unknown_key_is_noop() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add_item(hoodie());
        let state = store.remove_item(&LineItemKey::new("ghost"));
        assert_eq!(state.len(), 1);
    }
}
