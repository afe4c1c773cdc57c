//! Quick-view selection state.
//!
//! Tracks what the shopper has picked for one product (size, color, gallery
//! position, quantity) and turns a complete pick into a [`CartCandidate`].

use crate::cart::{CartCandidate, MAX_QUANTITY_PER_ITEM};
use crate::catalog::{Product, Size};
use crate::error::CommerceError;

/// Selection state for one product's quick view.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    product: &'a Product,
    size: Option<Size>,
    color: Option<String>,
    quantity: u32,
    image_index: usize,
}

impl<'a> Selection<'a> {
    /// Open a quick view: no size yet, first color preselected, quantity 1.
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            size: None,
            color: product.colors.first().cloned(),
            quantity: 1,
            image_index: 0,
        }
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Pick a size the product is offered in.
    pub fn select_size(&mut self, size: Size) -> Result<(), CommerceError> {
        if !self.product.offers_size(size) {
            return Err(CommerceError::SizeUnavailable {
                product: self.product.id.to_string(),
                size: size.to_string(),
            });
        }
        self.size = Some(size);
        Ok(())
    }

    /// Pick a color the product is offered in. Resets the gallery position.
    pub fn select_color(&mut self, color: &str) -> Result<(), CommerceError> {
        let found = self
            .product
            .find_color(color)
            .ok_or_else(|| CommerceError::ColorUnavailable {
                product: self.product.id.to_string(),
                color: color.to_string(),
            })?;
        self.color = Some(found.to_string());
        self.image_index = 0;
        Ok(())
    }

    /// Move the quantity stepper, staying within `1..=MAX_QUANTITY_PER_ITEM`.
    pub fn step_quantity(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(MAX_QUANTITY_PER_ITEM));
        self.quantity = next as u32;
        self.quantity
    }

    /// Gallery for the selected color.
    pub fn images(&self) -> &'a [String] {
        self.product.gallery(self.color.as_deref())
    }

    pub fn current_image(&self) -> Option<&'a str> {
        self.images().get(self.image_index).map(String::as_str)
    }

    /// Jump to a gallery position; out-of-range positions are ignored.
    pub fn select_image(&mut self, index: usize) -> Option<&'a str> {
        if index < self.images().len() {
            self.image_index = index;
        }
        self.current_image()
    }

    pub fn next_image(&mut self) -> Option<&'a str> {
        let len = self.images().len();
        if len > 0 {
            self.image_index = (self.image_index + 1) % len;
        }
        self.current_image()
    }

    pub fn prev_image(&mut self) -> Option<&'a str> {
        let len = self.images().len();
        if len > 0 {
            self.image_index = (self.image_index + len - 1) % len;
        }
        self.current_image()
    }

    /// Gallery position as "n / total", or `None` for an empty gallery.
    pub fn image_counter(&self) -> Option<String> {
        let len = self.images().len();
        (len > 0).then(|| format!("{} / {}", self.image_index + 1, len))
    }

    /// Whether enough has been picked to add to the cart.
    pub fn can_add(&self) -> bool {
        self.size.is_some() && (self.color.is_some() || !self.product.has_colors())
    }

    /// Build the add-to-cart request for the current pick.
    pub fn to_candidate(&self) -> Result<CartCandidate, CommerceError> {
        let size = self.size.ok_or(CommerceError::MissingSize)?;
        if self.product.has_colors() && self.color.is_none() {
            return Err(CommerceError::MissingColor);
        }

        Ok(CartCandidate {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            unit_price: self.product.price,
            size,
            color: self.color.clone(),
            image: self
                .product
                .primary_image(self.color.as_deref())
                .unwrap_or_default()
                .to_string(),
            quantity: i64::from(self.quantity),
        })
    }
}
