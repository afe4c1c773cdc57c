//! Checkout: summarize the cart and build the WhatsApp link.

use anyhow::{Context as _, Result};
use faide_commerce::checkout::whatsapp_handoff;
use faide_commerce::CommerceError;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_cart()?;

    let mut config = ctx.config.checkout.clone();
    if let Some(number) = args.number {
        config.whatsapp_number = number;
    }

    let handoff = match whatsapp_handoff(store.state(), &config) {
        Ok(handoff) => handoff,
        Err(e) if e.is_advisory() => {
            ctx.output.advisory(&e);
            return Ok(());
        }
        Err(e @ CommerceError::InvalidCheckoutConfig(_)) => {
            return Err(e).context("Set checkout.whatsapp_number in faide.toml or pass --number")
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&handoff);
        return Ok(());
    }

    if args.link_only {
        println!("{}", handoff.url);
        return Ok(());
    }

    ctx.output.header("Order Summary");
    for line in &handoff.summary.lines {
        ctx.output.list_item(&line.render());
    }
    ctx.output.info("");
    ctx.output.kv("items", &handoff.summary.item_count.to_string());
    ctx.output.kv("total", &handoff.summary.total.display());

    ctx.output.info("");
    ctx.output.success("Open this link to send your order on WhatsApp:");
    println!("{}", handoff.url);

    Ok(())
}
