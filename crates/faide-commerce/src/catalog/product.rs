//! Product type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Size;
use crate::ids::ProductId;
use crate::money::Money;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Merchandising badge (e.g. "Bestseller").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Category line shown under the name (e.g. "UNISEX Pullover Hoodie").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,
    /// Short description for the quick view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sizes on offer.
    #[serde(default = "Size::standard")]
    pub sizes: Vec<Size>,
    /// Colors on offer. Empty for products sold in a single colorway.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Default gallery.
    #[serde(default)]
    pub images: Vec<String>,
    /// Per-color galleries; colors without an entry use `images`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images_by_color: BTreeMap<String, Vec<String>>,
}

impl Product {
    /// Create a product with the standard size run and no colors.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: None,
            category: None,
            price,
            description: None,
            sizes: Size::standard(),
            colors: Vec::new(),
            images: Vec::new(),
            images_by_color: BTreeMap::new(),
        }
    }

    pub fn with_colors<I, C>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, P>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the shopper has to pick a color.
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    pub fn offers_size(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }

    /// Look up an offered color, ignoring case. Returns the catalog spelling.
    pub fn find_color(&self, color: &str) -> Option<&str> {
        self.colors
            .iter()
            .find(|c| c.eq_ignore_ascii_case(color.trim()))
            .map(String::as_str)
    }

    /// Gallery for a color, falling back to the default gallery.
    pub fn gallery(&self, color: Option<&str>) -> &[String] {
        color
            .and_then(|c| self.images_by_color.get(c))
            .filter(|imgs| !imgs.is_empty())
            .unwrap_or(&self.images)
    }

    /// First image for a color, if any.
    pub fn primary_image(&self, color: Option<&str>) -> Option<&str> {
        self.gallery(color).first().map(String::as_str)
    }
}
