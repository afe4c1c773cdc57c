//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up a catalog product id with a
//! cart line key, even though both are plain strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Size;

/// Separator between the parts of a [`LineItemKey`].
pub const KEY_SEPARATOR: &str = "__";

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog product (e.g. `"tee"`).
    ProductId
);
define_id!(
    /// Identity of a cart row: one purchasable product/size/color combination.
    LineItemKey
);

impl LineItemKey {
    /// Derive the key for a product/size/color combination.
    ///
    /// `tee` + `M` + `Black` gives `tee__M__Black`; without a color the last
    /// segment is dropped (`tank__L`).
    pub fn derive(product_id: &ProductId, size: Size, color: Option<&str>) -> Self {
        match color {
            Some(color) => Self(format!(
                "{product_id}{KEY_SEPARATOR}{size}{KEY_SEPARATOR}{color}"
            )),
            None => Self(format!("{product_id}{KEY_SEPARATOR}{size}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("tee");
        assert_eq!(id.as_str(), "tee");
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "hoodie".into();
        assert_eq!(id.as_str(), "hoodie");
    }

    #[test]
    fn test_id_display() {
        let id = ProductId::new("tank");
        assert_eq!(format!("{}", id), "tank");
    }

    #[test]
    fn test_key_with_color() {
        let key = LineItemKey::derive(&ProductId::new("tee"), Size::M, Some("Black"));
        assert_eq!(key.as_str(), "tee__M__Black");
    }

    #[test]
    fn test_key_without_color() {
        let key = LineItemKey::derive(&ProductId::new("tank"), Size::L, None);
        assert_eq!(key.as_str(), "tank__L");
    }

    #[test]
    fn test_key_distinguishes_size_and_color() {
        let tee = ProductId::new("tee");
        let a = LineItemKey::derive(&tee, Size::M, Some("Black"));
        let b = LineItemKey::derive(&tee, Size::L, Some("Black"));
        let c = LineItemKey::derive(&tee, Size::M, Some("White"));

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProductId::new("tee")).unwrap();
        assert_eq!(json, r#""tee""#);
    }
}
