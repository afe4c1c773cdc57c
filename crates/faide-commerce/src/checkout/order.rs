//! Order summary built from a cart at checkout.

use crate::cart::{CartState, LineItem};
use crate::catalog::Size;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One numbered line of an order summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 1-based position.
    pub number: usize,
    pub name: String,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub quantity: u32,
    #[serde(with = "crate::money::decimal")]
    pub line_total: Money,
}

impl OrderLine {
    fn from_item(number: usize, item: &LineItem) -> Self {
        Self {
            number,
            name: item.name.clone(),
            size: item.size,
            color: item.color.clone(),
            quantity: item.quantity,
            line_total: item.line_total(),
        }
    }

    /// `1. FAIDE Tee (Size M, Black) x3 - R2397.00`
    pub fn render(&self) -> String {
        let variant = match &self.color {
            Some(color) => format!("Size {}, {color}", self.size),
            None => format!("Size {}", self.size),
        };
        format!(
            "{}. {} ({variant}) x{} - {}",
            self.number,
            self.name,
            self.quantity,
            self.line_total.display()
        )
    }
}

/// Snapshot of a cart ready to be handed off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub item_count: u64,
    #[serde(with = "crate::money::decimal")]
    pub total: Money,
}

impl OrderSummary {
    /// Summarize a cart. Empty carts are refused with [`CommerceError::EmptyCart`].
    pub fn from_cart(cart: &CartState) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let lines = cart
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| OrderLine::from_item(i + 1, item))
            .collect();

        Ok(Self {
            lines,
            item_count: cart.total_quantity(),
            total: cart.total_price(),
        })
    }

    /// Render the message body sent to the shop.
    ///
    /// Greeting, one line per item, a blank line, the total, then blank
    /// name and address fields for the customer to fill in.
    pub fn render_message(&self, greeting: &str) -> String {
        let mut out = String::new();
        out.push_str(greeting);
        out.push_str("\n\n");
        for line in &self.lines {
            out.push_str(&line.render());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!("Total: {}\n\n", self.total.display()));
        out.push_str("Name: \nAddress: ");
        out
    }
}
