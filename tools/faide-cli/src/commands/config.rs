//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("dir", &config.store.dir);
    ctx.output.kv("cart_key", &config.store.cart_key);
    ctx.output.kv("legacy_keys", &config.store.legacy_keys.join(", "));

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("decrement_policy", config.cart.decrement_policy.as_str());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    if config.checkout.whatsapp_number.is_empty() {
        ctx.output.kv("whatsapp_number", "(not set)");
    } else {
        ctx.output.kv("whatsapp_number", &config.checkout.whatsapp_number);
    }
    ctx.output.kv("greeting", &config.checkout.greeting);
    ctx.output.kv("base_url", &config.checkout.base_url);

    ctx.output.info("");
    ctx.output.info("[media]");
    ctx.output.kv("images_dir", &config.media.images_dir);
    ctx.output.kv("probe_timeout_ms", &config.media.probe_timeout_ms.to_string());
    ctx.output.kv("max_variants", &config.media.max_variants.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        config.catalog.path.as_deref().unwrap_or("(built-in)"),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("faide.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output.info("Set checkout.whatsapp_number before running `faide checkout`.");

    Ok(())
}
