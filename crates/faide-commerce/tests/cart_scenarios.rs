//! End-to-end cart scenarios against the seed catalog and a file-backed store.

use std::sync::Arc;

use faide_cache::{FileStore, KvStore, MemoryStore};
use faide_commerce::cart::{DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY};
use faide_commerce::prelude::*;

fn add(
    store: &mut CartStore<impl KvStore>,
    catalog: &Catalog,
    id: &str,
    size: Size,
    color: Option<&str>,
    qty: i64,
) -> LineItemKey {
    let product = catalog.require(&ProductId::new(id)).unwrap();
    let mut selection = Selection::new(product);
    selection.select_size(size).unwrap();
    if let Some(color) = color {
        selection.select_color(color).unwrap();
    }
    selection.step_quantity(qty - 1);

    let candidate = selection.to_candidate().unwrap();
    let key = candidate.key();
    store.add_item(candidate);
    key
}

#[test]
fn test_repeat_add_merges_into_one_row() {
    let catalog = Catalog::seed();
    let mut store = CartStore::open(MemoryStore::new());

    add(&mut store, &catalog, "tee", Size::M, Some("Black"), 1);
    let key = add(&mut store, &catalog, "tee", Size::M, Some("Black"), 2);

    let state = store.state();
    assert_eq!(state.len(), 1);
    assert_eq!(key.as_str(), "tee__M__Black");
    assert_eq!(state.get(&key).unwrap().quantity, 3);
    assert_eq!(store.total_price(), Money::from_major(2397));
    assert_eq!(store.total_price().display(), "R2397.00");
}

#[test]
fn test_clear_empties_cart_and_store() {
    let catalog = Catalog::seed();
    let backend = Arc::new(MemoryStore::new());
    let mut store = CartStore::open(Arc::clone(&backend));

    add(&mut store, &catalog, "hoodie", Size::L, Some("Black"), 1);
    add(&mut store, &catalog, "tank", Size::S, None, 2);
    assert_eq!(store.total_quantity(), 3);

    store.clear();
    assert_eq!(store.total_quantity(), 0);
    assert!(store.total_price().is_zero());

    let reopened = CartStore::open(backend);
    assert!(reopened.state().is_empty());
}

#[test]
fn test_cart_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::seed();

    let key = {
        let mut store = CartStore::open(FileStore::open(dir.path()).unwrap());
        add(&mut store, &catalog, "longsleeve", Size::XL, Some("White"), 2);
        let key = add(&mut store, &catalog, "tee", Size::S, Some("Grey"), 1);
        store.increment(&key, 4);
        key
    };

    assert!(dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json")).exists());

    let store = CartStore::open(FileStore::open(dir.path()).unwrap());
    let state = store.state();
    assert_eq!(state.len(), 2);
    assert_eq!(state.items()[0].product_id.as_str(), "longsleeve");
    assert_eq!(state.get(&key).unwrap().quantity, 5);
    assert_eq!(store.total_price(), Money::from_major(999 * 2 + 799 * 5));
}

#[test]
fn test_legacy_snapshot_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{LEGACY_STORAGE_KEY}.json")),
        r#"[
            {"key": "tee_M", "id": "tee", "name": "FAIDE Tee", "price": 799, "size": "M", "image": "/images/tshirt.png", "qty": 2},
            {"key": "tee_M", "id": "tee", "name": "FAIDE Tee", "price": 799, "size": "M", "image": "/images/tshirt.png", "qty": 1},
            {"id": "tank", "name": "FAIDE Tank", "price": 699, "size": "XXXL", "qty": 1}
        ]"#,
    )
    .unwrap();

    let store = CartStore::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.total_quantity(), 3);
    assert!(dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json")).exists());

    // The migrated snapshot is now the source of truth.
    std::fs::remove_file(dir.path().join(format!("{LEGACY_STORAGE_KEY}.json"))).unwrap();
    let reopened = CartStore::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.total_quantity(), 3);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json")), "{not json").unwrap();

    let catalog = Catalog::seed();
    let mut store = CartStore::open(FileStore::open(dir.path()).unwrap());
    assert!(store.state().is_empty());

    add(&mut store, &catalog, "tee", Size::L, Some("White"), 1);
    let reopened = CartStore::open(FileStore::open(dir.path()).unwrap());
    assert_eq!(reopened.total_quantity(), 1);
}

#[test]
fn test_quota_failure_keeps_session_cart() {
    let catalog = Catalog::seed();
    let mut store = CartStore::open(MemoryStore::with_quota(16));

    add(&mut store, &catalog, "hoodie", Size::M, Some("Grey"), 1);
    assert_eq!(store.total_quantity(), 1);
    assert!(store.reload().is_empty());
}

#[test]
fn test_selection_gaps_are_advisories() {
    let catalog = Catalog::seed();
    let tee = catalog.require(&ProductId::new("tee")).unwrap();
    let selection = Selection::new(tee);

    let err = selection.to_candidate().unwrap_err();
    assert!(err.is_advisory());
    assert_eq!(err.advisory_message(), Some("Select a size first"));
}

#[test]
fn test_checkout_from_stored_cart() {
    let catalog = Catalog::seed();
    let mut store = CartStore::open(MemoryStore::new());
    add(&mut store, &catalog, "tee", Size::M, Some("Black"), 3);
    add(&mut store, &catalog, "tank", Size::L, None, 1);

    let handoff = whatsapp_handoff(store.state(), &CheckoutConfig::new("+27 82 000 0000")).unwrap();

    assert_eq!(handoff.summary.total, Money::from_major(2397 + 699));
    assert!(handoff.message.contains("1. FAIDE Tee (Size M, Black) x3 - R2397.00"));
    assert!(handoff.message.contains("2. FAIDE Tank (Size L) x1 - R699.00"));
    assert!(handoff.message.contains("Total: R3096.00"));
    assert!(handoff.url.starts_with("https://wa.me/27820000000?text="));

    // Checkout only reads the cart.
    assert_eq!(store.total_quantity(), 4);
}

#[test]
fn test_checkout_refuses_empty_cart() {
    let store = CartStore::open(MemoryStore::new());
    let err = whatsapp_handoff(store.state(), &CheckoutConfig::new("27820000000")).unwrap_err();
    assert!(matches!(err, CommerceError::EmptyCart));
}
