//! Line item and add-to-cart request types.

use crate::catalog::Size;
use crate::ids::{LineItemKey, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 99;

/// Clamp a requested quantity into `1..=MAX_QUANTITY_PER_ITEM`.
pub fn sanitize_quantity(raw: i64) -> u32 {
    raw.clamp(1, i64::from(MAX_QUANTITY_PER_ITEM)) as u32
}

/// Like [`sanitize_quantity`] for loosely typed input; non-finite values become 1.
pub fn sanitize_quantity_f64(raw: f64) -> u32 {
    if raw.is_finite() {
        sanitize_quantity(raw.trunc() as i64)
    } else {
        1
    }
}

/// A request to put something in the cart.
///
/// Name, price and image are snapshots taken from the catalog at add time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartCandidate {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub size: Size,
    pub color: Option<String>,
    pub image: String,
    /// Requested quantity; anything below 1 counts as 1.
    pub quantity: i64,
}

impl CartCandidate {
    /// The cart row this candidate lands in.
    pub fn key(&self) -> LineItemKey {
        LineItemKey::derive(&self.product_id, self.size, self.color.as_deref())
    }
}

/// One row in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Identity of the row, derived from product, size and color.
    pub key: LineItemKey,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (snapshot).
    pub name: String,
    /// Unit price (snapshot).
    #[serde(with = "crate::money::decimal")]
    pub unit_price: Money,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Display image.
    pub image: String,
    /// Quantity, always within `1..=MAX_QUANTITY_PER_ITEM`.
    pub quantity: u32,
}

impl LineItem {
    /// Create a row from a candidate, normalizing quantity and price.
    pub fn from_candidate(candidate: CartCandidate) -> Self {
        let key = candidate.key();
        Self {
            key,
            product_id: candidate.product_id,
            name: candidate.name,
            unit_price: candidate.unit_price.max(Money::zero()),
            size: candidate.size,
            color: candidate.color,
            image: candidate.image,
            quantity: sanitize_quantity(candidate.quantity),
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// "Black • Size M", or "Size M" without a color.
    pub fn variant_label(&self) -> String {
        match &self.color {
            Some(color) => format!("{color} \u{2022} Size {}", self.size),
            None => format!("Size {}", self.size),
        }
    }
}
