//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List every product.
    List,
    /// Open the quick view for a product.
    Show {
        /// Product id (e.g. `tee`).
        id: String,

        /// Color to preview (defaults to the first offered).
        #[arg(long)]
        color: Option<String>,

        /// Skip probing for gallery images.
        #[arg(long)]
        no_probe: bool,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    List,
    /// Add a product to the cart.
    Add {
        /// Product id (e.g. `tee`).
        id: String,

        /// Size code (XS, S, M, L, XL, XXL).
        #[arg(short, long)]
        size: Option<String>,

        /// Color, for products offered in more than one.
        #[arg(long)]
        color: Option<String>,

        /// Quantity to add.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        qty: i64,
    },
    /// Increase an item's quantity.
    Inc {
        /// Cart item key (see `faide cart list`).
        key: String,

        /// Amount to add.
        #[arg(long, default_value = "1")]
        by: u32,
    },
    /// Decrease an item's quantity.
    Dec {
        /// Cart item key (see `faide cart list`).
        key: String,

        /// Amount to subtract.
        #[arg(long, default_value = "1")]
        by: u32,

        /// `clamp` or `remove-on-zero` (default from config).
        #[arg(long)]
        policy: Option<String>,
    },
    /// Remove an item.
    Remove {
        /// Cart item key (see `faide cart list`).
        key: String,
    },
    /// Remove every item.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// WhatsApp number to send the order to (overrides config).
    #[arg(long)]
    pub number: Option<String>,

    /// Print only the link.
    #[arg(long)]
    pub link_only: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
