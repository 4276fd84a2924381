//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { name, force } => init_config(&name, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    let shell = &ctx.config.shell;

    ctx.output.info("[shell]");
    ctx.output.kv("store_name", &shell.store_name);
    ctx.output.kv("currency", shell.currency.code());
    ctx.output
        .kv("storage_dir", &ctx.config.storage_dir().display().to_string());
    ctx.output.kv("logging", &shell.logging.to_string());
    ctx.output.kv("log_level", &shell.log_level.to_string());
    ctx.output.kv("toast_duration_ms", &shell.toast_duration_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv("id", &ctx.config.session.id);

    Ok(())
}

fn init_config(name: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("storefront.toml");

    if path.exists() && !force {
        bail!("storefront.toml already exists. Use --force to overwrite.");
    }

    fs::write(&path, generate_default_config(name))?;
    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.config.shell.validate()?;

    let catalog_path = ctx.resolve_path(&ctx.config.catalog.path);
    if !catalog_path.exists() {
        ctx.output
            .warn(&format!("Catalog not found: {}", catalog_path.display()));
    } else {
        let catalog = ctx.catalog()?;
        ctx.output
            .debug(&format!("Catalog has {} products", catalog.len()));
    }

    if ctx.config.session.id.trim().is_empty() {
        bail!("session.id must not be empty");
    }

    // Round-trip through the on-disk format to catch unserializable values.
    let _: CliConfig = toml::from_str(&toml::to_string_pretty(&ctx.config)?)?;

    ctx.output.success("Configuration is valid");
    Ok(())
}
