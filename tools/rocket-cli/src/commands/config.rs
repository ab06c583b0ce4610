//! Configuration management commands.

use anyhow::{bail, Result};
use rocket_cart::CartConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
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

    let config = &ctx.config;
    ctx.output.info("[catalog]");
    ctx.output.kv("base_url", &config.catalog.base_url);
    ctx.output.kv("timeout_ms", &config.catalog.timeout_ms.to_string());
    ctx.output.kv("max_retries", &config.catalog.max_retries.to_string());
    ctx.output.kv("backoff_ms", &config.catalog.backoff_ms.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &config.storage.dir.display().to_string());
    ctx.output.kv("namespace", &config.storage.namespace);
    ctx.output.kv("in_memory", &config.storage.in_memory.to_string());

    ctx.output.info("[cart]");
    ctx.output.kv("missing_item", &format!("{:?}", config.cart.missing_item).to_lowercase());

    ctx.output.info("[logging]");
    ctx.output.kv("format", &config.logging.format.to_string());
    ctx.output.kv("filter", &config.logging.filter);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.default_config_path();

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    CartConfig::default().save(&config_path)?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let errors = check(&ctx.config);

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len())
}

fn check(config: &CartConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if let Err(e) = config.catalog.client() {
        errors.push(format!("catalog: {}", e));
    }
    if config.storage.namespace.trim().is_empty() {
        errors.push("storage.namespace is required".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(check(&CartConfig::default()).is_empty());
    }

    #[test]
    fn test_invalid_config_reports_every_error() {
        let mut config = CartConfig::default();
        config.catalog.base_url = "ftp://catalog".to_string();
        config.catalog.timeout_ms = 0;
        config.storage.namespace = " ".to_string();

        let errors = check(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Invalid URL"));
        assert!(errors[1].starts_with("storage.namespace"));
    }

    #[test]
    fn test_zero_timeout_is_reported() {
        let mut config = CartConfig::default();
        config.catalog.timeout_ms = 0;

        let errors = check(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("timeout_ms"));
    }
}
