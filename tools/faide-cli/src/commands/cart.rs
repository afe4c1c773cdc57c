//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use faide_cache::KvStore;
use faide_commerce::cart::{CartState, DecrementPolicy};
use faide_commerce::catalog::{Selection, Size};
use faide_commerce::{CartStore, CommerceError, LineItemKey, ProductId};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::column_width;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;

    match args.command {
        CartCommand::List => {
            print_cart(store.state(), ctx);
            Ok(())
        }
        CartCommand::Add {
            id,
            size,
            color,
            qty,
        } => add_item(&mut store, &id, size.as_deref(), color.as_deref(), qty, ctx),
        CartCommand::Inc { key, by } => {
            let key = existing_key(&store, &key)?;
            store.increment(&key, by);
            report_quantity(&store, &key, ctx);
            Ok(())
        }
        CartCommand::Dec { key, by, policy } => {
            let key = existing_key(&store, &key)?;
            let policy = match policy {
                Some(p) => DecrementPolicy::from_str(&p).with_context(|| {
                    format!("Unknown policy: {}. Available: clamp, remove-on-zero", p)
                })?,
                None => ctx.config.cart.decrement_policy,
            };
            match policy {
                DecrementPolicy::Clamp => store.decrement_clamped(&key, by),
                DecrementPolicy::RemoveOnZero => store.decrement_or_remove(&key, by),
            };
            report_quantity(&store, &key, ctx);
            Ok(())
        }
        CartCommand::Remove { key } => {
            let key = LineItemKey::new(key);
            if !store.state().contains(&key) {
                ctx.output.warn(&format!("Nothing in the cart under {}", key));
                return Ok(());
            }
            store.remove_item(&key);
            ctx.output.success(&format!("Removed {}", key));
            print_badge(store.state(), ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => clear_cart(&mut store, yes, ctx),
    }
}

fn add_item<S: KvStore>(
    store: &mut CartStore<S>,
    id: &str,
    size: Option<&str>,
    color: Option<&str>,
    qty: i64,
    ctx: &Context,
) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.require(&ProductId::new(id))?;

    let mut selection = Selection::new(product);
    if let Some(code) = size {
        let size = Size::from_code(code).ok_or_else(|| CommerceError::UnknownSize(code.to_string()))?;
        selection.select_size(size)?;
    }
    if let Some(color) = color {
        selection.select_color(color)?;
    }
    selection.step_quantity(qty.saturating_sub(1));

    let candidate = match selection.to_candidate() {
        Ok(candidate) => candidate,
        Err(e) if e.is_advisory() => {
            ctx.output.advisory(&e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let key = candidate.key();
    let added = candidate.quantity;
    store.add_item(candidate);

    if ctx.output.is_json() {
        print_cart(store.state(), ctx);
        return Ok(());
    }

    let quantity = store.get(&key).map_or(0, |item| item.quantity);
    ctx.output.success(&format!(
        "Added {} x{} ({} in cart)",
        key, added, quantity
    ));
    print_badge(store.state(), ctx);
    Ok(())
}

fn clear_cart<S: KvStore>(store: &mut CartStore<S>, yes: bool, ctx: &Context) -> Result<()> {
    if store.is_empty() {
        ctx.output.info("Your cart is already empty");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", store.total_quantity()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left as it was");
            return Ok(());
        }
    }

    store.clear();
    ctx.output.success("Cart cleared");
    if ctx.output.is_json() {
        print_cart(store.state(), ctx);
    }
    Ok(())
}

fn existing_key<S: KvStore>(store: &CartStore<S>, key: &str) -> Result<LineItemKey> {
    let key = LineItemKey::new(key);
    if !store.state().contains(&key) {
        bail!(CommerceError::ItemNotInCart(key.to_string()));
    }
    Ok(key)
}

fn report_quantity<S: KvStore>(store: &CartStore<S>, key: &LineItemKey, ctx: &Context) {
    if ctx.output.is_json() {
        print_cart(store.state(), ctx);
        return;
    }

    match store.state().get(key) {
        Some(item) => ctx
            .output
            .success(&format!("{} now x{}", key, item.quantity)),
        None => ctx.output.success(&format!("Removed {}", key)),
    }
    print_badge(store.state(), ctx);
}

fn print_badge(state: &CartState, ctx: &Context) {
    ctx.output.info(&format!(
        "{} item(s), {}",
        state.total_quantity(),
        state.total_price().display()
    ));
}

fn print_cart(state: &CartState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": state.items(),
            "total_quantity": state.total_quantity(),
            "total": state.total_price().to_decimal(),
        }));
        return;
    }

    ctx.output.header("Your Cart");

    if state.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let rows: Vec<[String; 5]> = state
        .items()
        .iter()
        .map(|item| {
            [
                item.key.to_string(),
                item.name.clone(),
                item.variant_label(),
                format!("x{}", item.quantity),
                item.line_total().display(),
            ]
        })
        .collect();

    let headers = ["KEY", "ITEM", "VARIANT", "QTY", "TOTAL"];
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| column_width(h, rows.iter().map(|r| r[i].as_str())))
        .collect();

    ctx.output.table_header(&headers, &widths);
    for row in &rows {
        let cols: Vec<&str> = row.iter().map(String::as_str).collect();
        ctx.output.table_row(&cols, &widths);
    }

    ctx.output.info("");
    ctx.output.kv("items", &state.total_quantity().to_string());
    ctx.output.kv("total", &state.total_price().display());
}
