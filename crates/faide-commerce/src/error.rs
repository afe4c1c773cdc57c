//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Some variants are *advisories*: gaps in what the shopper selected. They are
/// meant to be shown as a short, non-blocking message and never abort the
/// session. See [`CommerceError::is_advisory`].
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Size code is not one of the known sizes.
    #[error("Unknown size: {0}")]
    UnknownSize(String),

    /// The product is not offered in this size.
    #[error("Size {size} is not available for {product}")]
    SizeUnavailable { product: String, size: String },

    /// The product is not offered in this color.
    #[error("Color {color} is not available for {product}")]
    ColorUnavailable { product: String, color: String },

    /// No size selected yet.
    #[error("Select a size first")]
    MissingSize,

    /// No color selected yet.
    #[error("Select a color first")]
    MissingColor,

    /// Checkout requested on an empty cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Checkout handoff is not configured correctly.
    #[error("Invalid checkout configuration: {0}")]
    InvalidCheckoutConfig(String),

    /// Catalog file could not be read or parsed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Malformed URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl CommerceError {
    /// Whether this error is a user-input gap rather than a failure.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            CommerceError::MissingSize | CommerceError::MissingColor | CommerceError::EmptyCart
        )
    }

    /// Short text suitable for a toast, for advisory errors.
    pub fn advisory_message(&self) -> Option<&'static str> {
        match self {
            CommerceError::MissingSize => Some("Select a size first"),
            CommerceError::MissingColor => Some("Select a color first"),
            CommerceError::EmptyCart => Some("Your cart is empty"),
            _ => None,
        }
    }
}
