//! Cart state and its invariant-preserving operations.

use serde::{Deserialize, Serialize};

use crate::cart::{CartCandidate, LineItem, MAX_QUANTITY_PER_ITEM};
use crate::ids::LineItemKey;
use crate::money::Money;

/// How a quantity change that would drop below 1 is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecrementPolicy {
    /// Quantity never drops below 1; decrementing at 1 is a no-op.
    #[default]
    Clamp,
    /// Reaching 0 (or less) removes the row.
    RemoveOnZero,
}

impl DecrementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecrementPolicy::Clamp => "clamp",
            DecrementPolicy::RemoveOnZero => "remove-on-zero",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clamp" => Some(DecrementPolicy::Clamp),
            "remove-on-zero" | "remove" => Some(DecrementPolicy::RemoveOnZero),
            _ => None,
        }
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The row now holds this quantity.
    Updated(u32),
    /// The row exists but its quantity did not move.
    Unchanged,
    /// The row was removed.
    Removed,
    /// No row with that key.
    NotFound,
}

impl QuantityChange {
    /// Whether the cart contents changed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, QuantityChange::Updated(_) | QuantityChange::Removed)
    }
}

/// The cart contents: line items in the order they were first added.
///
/// Keys are unique and every quantity is within `1..=MAX_QUANTITY_PER_ITEM`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<LineItem>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from rows, merging any that share a key.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut state = Self::new();
        for item in items {
            state.insert_or_merge(item);
        }
        state
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &LineItemKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    pub fn contains(&self, key: &LineItemKey) -> bool {
        self.get(key).is_some()
    }

    /// Add a candidate, merging into an existing row with the same key.
    ///
    /// Merged quantities are capped at [`MAX_QUANTITY_PER_ITEM`]. Returns the
    /// key of the affected row.
    pub fn add_item(&mut self, candidate: CartCandidate) -> LineItemKey {
        self.merge_candidate(candidate).0
    }

    /// Like [`CartState::add_item`], also reporting how the row changed.
    ///
    /// Merging into a row already at the cap yields
    /// [`QuantityChange::Unchanged`].
    pub fn merge_candidate(&mut self, candidate: CartCandidate) -> (LineItemKey, QuantityChange) {
        let item = LineItem::from_candidate(candidate);
        let key = item.key.clone();
        let change = self.insert_or_merge(item);
        (key, change)
    }

    fn insert_or_merge(&mut self, item: LineItem) -> QuantityChange {
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == item.key) {
            let merged = existing
                .quantity
                .saturating_add(item.quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            if merged == existing.quantity {
                return QuantityChange::Unchanged;
            }
            existing.quantity = merged;
            QuantityChange::Updated(merged)
        } else {
            let quantity = item.quantity;
            self.items.push(item);
            QuantityChange::Updated(quantity)
        }
    }

    /// Add `delta` to a row's quantity under the given policy.
    ///
    /// The upper bound is always [`MAX_QUANTITY_PER_ITEM`]; `policy` decides
    /// what happens at the lower end.
    pub fn update_quantity(
        &mut self,
        key: &LineItemKey,
        delta: i64,
        policy: DecrementPolicy,
    ) -> QuantityChange {
        let Some(index) = self.items.iter().position(|i| &i.key == key) else {
            return QuantityChange::NotFound;
        };

        let current = self.items[index].quantity;
        let target = i64::from(current).saturating_add(delta);

        if target <= 0 && policy == DecrementPolicy::RemoveOnZero {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        let next = target.clamp(1, i64::from(MAX_QUANTITY_PER_ITEM)) as u32;
        if next == current {
            return QuantityChange::Unchanged;
        }
        self.items[index].quantity = next;
        QuantityChange::Updated(next)
    }

    /// Remove a row. Returns whether anything was removed.
    pub fn remove_item(&mut self, key: &LineItemKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.key != key);
        self.items.len() < len_before
    }

    /// Remove every row.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities (the badge count).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of unit price times quantity.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }
}
