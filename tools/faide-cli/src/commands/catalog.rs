//! Catalog browsing and quick view.

use std::sync::Arc;

use anyhow::Result;
use faide_commerce::catalog::{Catalog, Product, Selection};
use faide_commerce::media::{spawn_probe, Gallery};
use faide_commerce::ProductId;
use serde_json::json;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::column_width;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command {
        CatalogCommand::List => list_products(&catalog, ctx).await,
        CatalogCommand::Show { id, color, no_probe } => {
            show_product(&catalog, &id, color.as_deref(), no_probe, ctx).await
        }
    }
}

async fn list_products(catalog: &Catalog, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let products: Vec<&Product> = catalog.iter().collect();
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("FAIDE Catalog");

    if catalog.is_empty() {
        ctx.output.info("No products");
        return Ok(());
    }

    let rows: Vec<[String; 4]> = catalog
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                p.price.display(),
                p.label.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let headers = ["ID", "NAME", "PRICE", "LABEL"];
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

    Ok(())
}

async fn show_product(
    catalog: &Catalog,
    id: &str,
    color: Option<&str>,
    no_probe: bool,
    ctx: &Context,
) -> Result<()> {
    let product = catalog.require(&ProductId::new(id))?;
    let mut selection = Selection::new(product);
    if let Some(color) = color {
        selection.select_color(color)?;
    }

    let gallery = match selection.current_image() {
        Some(base) if !no_probe => probe_gallery(base, ctx).await,
        _ => None,
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "color": selection.color(),
            "images": selection.images(),
            "gallery": gallery,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    if let Some(ref label) = product.label {
        ctx.output.kv("label", label);
    }
    if let Some(ref category) = product.category {
        ctx.output.kv("category", category);
    }
    ctx.output.kv("price", &product.price.display());
    if let Some(ref description) = product.description {
        ctx.output.kv("description", description);
    }

    let sizes: Vec<&str> = product.sizes.iter().map(|s| s.as_str()).collect();
    ctx.output.kv("sizes", &sizes.join(", "));
    if product.has_colors() {
        ctx.output.kv("colors", &product.colors.join(", "));
        if let Some(color) = selection.color() {
            ctx.output.kv("selected", color);
        }
    }

    if let Some(counter) = selection.image_counter() {
        ctx.output.kv("image", &counter);
    }

    match gallery {
        Some(gallery) => {
            ctx.output.info("");
            ctx.output.info("Gallery:");
            for image in &gallery.images {
                ctx.output.list_item(image);
            }
            if gallery.fallback_used {
                ctx.output.warn("No gallery images found on disk, showing the base image");
            }
        }
        None => {
            ctx.output.info("");
            ctx.output.info("Images:");
            for image in selection.images() {
                ctx.output.list_item(image);
            }
        }
    }

    Ok(())
}

async fn probe_gallery(base: &str, ctx: &Context) -> Option<Gallery> {
    let probe = Arc::new(ctx.image_probe());
    ctx.output
        .debug(&format!("probing images under {}", probe.root().display()));

    let spinner = ctx.output.spinner("Looking for gallery images...");
    let handle = spawn_probe(probe, base, ctx.config.media.probe_options());
    let abort = handle.abort_handle();

    // Ctrl-C abandons the lookup but still shows the product.
    let gallery = tokio::select! {
        gallery = handle.join() => gallery,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            None
        }
    };
    spinner.finish_and_clear();
    gallery
}
