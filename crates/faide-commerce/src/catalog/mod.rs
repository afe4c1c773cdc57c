//! Product catalog module.
//!
//! Contains the product type, sizes, the quick-view selection, and the
//! static catalog the storefront is seeded with.

mod product;
mod selection;
mod size;

pub use product::Product;
pub use selection::Selection;
pub use size::Size;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// The set of products on sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CommerceError::Catalog(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            if product.price.is_negative() {
                return Err(CommerceError::Catalog(format!(
                    "negative price for {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// The built-in FAIDE range.
    pub fn seed() -> Self {
        Self {
            products: vec![
                Product::new("tee", "FAIDE Tee", Money::from_major(799))
                    .with_label("Bestseller")
                    .with_category("UNISEX Short-Sleeve Top")
                    .with_description("Premium cotton tee. Clean fit. Built for daily wear.")
                    .with_colors(["Black", "White", "Grey"])
                    .with_images(variants("/images/tshirt")),
                Product::new("hoodie", "FAIDE Hoodie", Money::from_major(1499))
                    .with_label("Premium")
                    .with_category("UNISEX Pullover Hoodie")
                    .with_description("Heavyweight hoodie. Soft handfeel. Minimal branding.")
                    .with_colors(["Black", "Grey"])
                    .with_images(variants("/images/hoodie")),
                Product::new("longsleeve", "FAIDE Long Sleeve", Money::from_major(999))
                    .with_label("Member Exclusive")
                    .with_category("UNISEX Long Sleeve")
                    .with_description("Long sleeve essential. Clean lines. Premium feel.")
                    .with_colors(["Black", "White"])
                    .with_images(variants("/images/longsleeve")),
                Product::new("tank", "FAIDE Tank", Money::from_major(699))
                    .with_label("Just In")
                    .with_category("UNISEX Tank Top")
                    .with_description("Summer cut tank. Lightweight. Street-ready.")
                    .with_images(variants("/images/tank-top")),
            ],
        }
    }

    /// Load a catalog from a TOML or JSON file (chosen by extension).
    ///
    /// The file holds a top-level `products` list; prices are decimal rand.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::Catalog(format!("{}: {e}", path.display())))?;

        let file: Catalog = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .map_err(|e| CommerceError::Catalog(format!("{}: {e}", path.display())))?
        } else {
            toml::from_str(&content)
                .map_err(|e| CommerceError::Catalog(format!("{}: {e}", path.display())))?
        };

        tracing::debug!(path = %path.display(), products = file.products.len(), "loaded catalog");
        Self::new(file.products)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product or fail with [`CommerceError::ProductNotFound`].
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// `"/images/tshirt"` -> `tshirt.png, tshirt1.png, tshirt2.png, tshirt3.png`.
fn variants(stem: &str) -> Vec<String> {
    std::iter::once(format!("{stem}.png"))
        .chain((1..=3).map(|n| format!("{stem}{n}.png")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 4);

        let tee = catalog.get(&ProductId::new("tee")).unwrap();
        assert_eq!(tee.price, Money::from_major(799));
        assert_eq!(tee.images.len(), 4);
        assert_eq!(tee.images[1], "/images/tshirt1.png");

        let tank = catalog.get(&ProductId::new("tank")).unwrap();
        assert!(!tank.has_colors());
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let seed = Catalog::seed();
        let products: Vec<Product> = seed.iter().cloned().collect();
        assert!(Catalog::new(products).is_ok());
    }

    #[test]
    fn test_require_missing_product() {
        let catalog = Catalog::seed();
        assert!(matches!(
            catalog.require(&ProductId::new("socks")),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let p = Product::new("tee", "FAIDE Tee", Money::from_major(799));
        assert!(Catalog::new(vec![p.clone(), p]).is_err());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[products]]
id = "cap"
name = "FAIDE Cap"
price = 249.5
sizes = ["M"]
colors = ["Black"]
images = ["/images/cap.png"]
"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        let cap = catalog.get(&ProductId::new("cap")).unwrap();
        assert_eq!(cap.price, Money::new(24950));
        assert_eq!(cap.sizes, vec![Size::M]);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"products": [{{"id": "tee", "name": "FAIDE Tee", "price": 799}}]}}"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_from_path_reports_parse_errors() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not valid").unwrap();
        assert!(matches!(
            Catalog::from_path(file.path()),
            Err(CommerceError::Catalog(_))
        ));
    }
}
