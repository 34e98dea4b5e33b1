//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("api_base_url", &catalog.api_base_url);
    ctx.output.kv("page_size", &catalog.page_size.to_string());
    ctx.output.kv("fallback_image_url", catalog.fallback_image_url());
    ctx.output
        .kv("refetch_on_load_more", &catalog.refetch_on_load_more.to_string());
    if let Some(secs) = catalog.timeout_secs {
        ctx.output.kv("timeout_secs", &secs.to_string());
    }

    ctx.output.info("");
    ctx.output.info("[chat]");
    ctx.output.kv("webhook_url", &ctx.config.chat.webhook_url);
    ctx.output.kv("session_id", &ctx.config.chat.session_id);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get_value(key)?;

    if ctx.output.is_json() {
        let value: serde_json::Value = serde_json::from_str(&value)?;
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() {
        if !force {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        ctx.output
            .warn(&format!("Overwriting {}", config_path.display()));
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len())
}
