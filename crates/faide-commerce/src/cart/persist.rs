//! Wire shape of the persisted cart and the tolerant decoder for it.
//!
//! The stored value is a JSON array of flat records:
//!
//! ```json
//! [{"key": "tee__M__Black", "id": "tee", "name": "FAIDE Tee", "price": 799.0,
//!   "size": "M", "color": "Black", "image": "/images/tshirt.png", "quantity": 3}]
//! ```
//!
//! Older snapshots wrote `qty` instead of `quantity`, omitted `color`, and used
//! other key spellings. Records are decoded one at a time so that a single bad
//! row costs only that row.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::cart::{sanitize_quantity_f64, CartState, LineItem};
use crate::catalog::Size;
use crate::ids::{LineItemKey, ProductId};
use crate::money::Money;

/// One persisted cart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLineItem {
    /// Row key as written; recomputed on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub id: String,
    pub name: String,
    /// Unit price in rand.
    pub price: f64,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub image: String,
    /// Read leniently (older snapshots wrote fractions), always written as an integer.
    #[serde(alias = "qty", serialize_with = "serialize_quantity")]
    pub quantity: f64,
}

fn serialize_quantity<S: Serializer>(quantity: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u32(sanitize_quantity_f64(*quantity))
}

/// Why a persisted row was dropped.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("unreadable record: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("unknown size {0:?}")]
    UnknownSize(String),

    #[error("invalid price {0}")]
    InvalidPrice(f64),

    #[error("invalid quantity {0}")]
    InvalidQuantity(f64),

    #[error("missing product id")]
    MissingProductId,
}

impl From<&LineItem> for StoredLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            key: Some(item.key.to_string()),
            id: item.product_id.to_string(),
            name: item.name.clone(),
            price: item.unit_price.to_decimal(),
            size: item.size.to_string(),
            color: item.color.clone(),
            image: item.image.clone(),
            quantity: f64::from(item.quantity),
        }
    }
}

impl StoredLineItem {
    /// Validate and convert into a domain row with a canonical key.
    pub fn into_line_item(self) -> Result<LineItem, RestoreError> {
        if self.id.trim().is_empty() {
            return Err(RestoreError::MissingProductId);
        }
        let size = Size::from_code(&self.size).ok_or(RestoreError::UnknownSize(self.size))?;

        let unit_price = Money::from_decimal(self.price)
            .filter(|m| !m.is_negative())
            .ok_or(RestoreError::InvalidPrice(self.price))?;

        if !self.quantity.is_finite() || self.quantity < 1.0 {
            return Err(RestoreError::InvalidQuantity(self.quantity));
        }
        let quantity = sanitize_quantity_f64(self.quantity);

        let color = self
            .color
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let product_id = ProductId::new(self.id);

        Ok(LineItem {
            key: LineItemKey::derive(&product_id, size, color.as_deref()),
            product_id,
            name: self.name,
            unit_price,
            size,
            color,
            image: self.image,
            quantity,
        })
    }
}

/// Encode a cart into its persisted shape.
pub fn encode(state: &CartState) -> Vec<StoredLineItem> {
    state.items().iter().map(StoredLineItem::from).collect()
}

/// Decode persisted records, skipping any that cannot be restored.
///
/// Rows whose canonical keys collide are merged.
pub fn decode(records: Vec<serde_json::Value>) -> CartState {
    let total = records.len();
    let items = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            match serde_json::from_value::<StoredLineItem>(value)
                .map_err(RestoreError::from)
                .and_then(StoredLineItem::into_line_item)
            {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping persisted cart row");
                    None
                }
            }
        });

    let state = CartState::from_items(items);
    if state.len() < total {
        tracing::debug!(restored = state.len(), total, "cart restored with fewer rows");
    }
    state
}
