//! Storefront domain types and logic for FAIDE.
//!
//! - **Catalog**: products, sizes, and the quick-view selection
//! - **Cart**: line items, the cart state, and the write-through [`CartStore`]
//! - **Checkout**: order summaries and the WhatsApp handoff link
//! - **Media**: async discovery of product image galleries
//!
//! # Example
//!
//! ```rust,ignore
//! use faide_cache::FileStore;
//! use faide_commerce::prelude::*;
//!
//! let catalog = Catalog::seed();
//! let mut cart = CartStore::open(FileStore::open(".faide")?);
//!
//! let tee = catalog.require(&ProductId::new("tee"))?;
//! let mut selection = Selection::new(tee);
//! selection.select_size(Size::M)?;
//! cart.add_item(selection.to_candidate()?);
//!
//! let handoff = whatsapp_handoff(cart.state(), &CheckoutConfig::new("27820000000"))?;
//! println!("{}", handoff.url);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod media;

pub use cart::CartStore;
pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product, Selection, Size};

    // Cart
    pub use crate::cart::{
        CartCandidate, CartState, CartStore, CartStoreConfig, DecrementPolicy, LineItem,
        QuantityChange, MAX_QUANTITY_PER_ITEM,
    };

    // Checkout
    pub use crate::checkout::{whatsapp_handoff, CheckoutConfig, Handoff, OrderSummary};

    // Media
    pub use crate::media::{FsImageProbe, Gallery, ImageProbe, ProbeOptions};
}
