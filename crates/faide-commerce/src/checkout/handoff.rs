//! WhatsApp checkout handoff.
//!
//! There is no payment step: checkout ends by opening a chat with the shop,
//! prefilled with the order.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cart::CartState;
use crate::checkout::OrderSummary;
use crate::error::CommerceError;

/// Default messaging endpoint.
pub const DEFAULT_BASE_URL: &str = "https://wa.me";

/// Default first line of the message.
pub const DEFAULT_GREETING: &str = "Hi FAIDE! I'd like to place an order:";

/// Characters left bare in the `text` parameter. Spaces become `%20`, never
/// `+`, which some messaging clients show literally.
const TEXT_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Where and how the order message is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Shop's WhatsApp number in international form; non-digits are ignored.
    #[serde(default)]
    pub whatsapp_number: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl CheckoutConfig {
    pub fn new(whatsapp_number: impl Into<String>) -> Self {
        Self {
            whatsapp_number: whatsapp_number.into(),
            greeting: default_greeting(),
            base_url: default_base_url(),
        }
    }

    /// Digits of the number, e.g. `+27 (82) 000-0000` -> `27820000000`.
    pub fn normalized_number(&self) -> Result<String, CommerceError> {
        let digits: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return Err(CommerceError::InvalidCheckoutConfig(
                "whatsapp_number has no digits".to_string(),
            ));
        }
        Ok(digits)
    }
}

/// A ready-to-open checkout link plus what went into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handoff {
    pub summary: OrderSummary,
    pub message: String,
    pub url: String,
}

/// Build the checkout link for a cart.
///
/// Fails with [`CommerceError::EmptyCart`] when there is nothing to order;
/// the cart is only read.
pub fn whatsapp_handoff(cart: &CartState, config: &CheckoutConfig) -> Result<Handoff, CommerceError> {
    let summary = OrderSummary::from_cart(cart)?;
    let message = summary.render_message(&config.greeting);
    let number = config.normalized_number()?;

    let mut url = Url::parse(&config.base_url)?;
    url.path_segments_mut()
        .map_err(|()| {
            CommerceError::InvalidCheckoutConfig(format!("base_url cannot have a path: {}", config.base_url))
        })?
        .pop_if_empty()
        .push(&number);
    let text = utf8_percent_encode(&message, TEXT_COMPONENT);
    url.set_query(Some(&format!("text={text}")));

    tracing::debug!(items = summary.item_count, "built checkout link");
    Ok(Handoff {
        summary,
        message,
        url: url.into(),
    })
}
