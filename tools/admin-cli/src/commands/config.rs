//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES, ENV_API_URL, ENV_CLIENT_ID};
use crate::context::Context;
use crate::output::format_bytes;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    if let Some(ref id) = ctx.config.api.client_id {
        ctx.output.kv("client_id", id);
    }
    ctx.output
        .kv("timeout_secs", &ctx.config.api.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[builder]");
    ctx.output.kv("image_axis", &ctx.config.builder.image_axis);
    ctx.output.kv(
        "enforce_image_coupling",
        &ctx.config.builder.enforce_image_coupling.to_string(),
    );
    ctx.output.kv(
        "max_image_bytes",
        &format!(
            "{} ({})",
            ctx.config.builder.max_image_bytes,
            format_bytes(ctx.config.builder.max_image_bytes)
        ),
    );

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output
        .kv("path", &ctx.session_store().path().display().to_string());

    let overrides: Vec<&str> = [ENV_API_URL, ENV_CLIENT_ID]
        .into_iter()
        .filter(|name| std::env::var_os(name).is_some())
        .collect();
    if !overrides.is_empty() {
        ctx.output.info("");
        ctx.output.info("Environment overrides:");
        for name in overrides {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.as_ref() else {
        bail!("No config file found. Run `turbo-admin config init` to create one.");
    };

    // Reload without env overrides so they are not written back
    let mut config = CliConfig::load(config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Returns (errors, warnings).
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let url = &config.api.base_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(format!("api.base_url '{}' must be an http(s) URL", url));
    } else if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warnings.push("api.base_url sends the token over plain http".to_string());
    }

    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    if config.builder.image_axis.trim().is_empty() {
        errors.push("builder.image_axis is required".to_string());
    }

    if config.builder.max_image_bytes == 0 {
        errors.push("builder.max_image_bytes must be greater than 0".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => Ok(format!("\"{}\"", config.api.base_url)),
        ["api", "client_id"] => Ok(config
            .api
            .client_id
            .as_ref()
            .map(|id| format!("\"{}\"", id))
            .unwrap_or_else(|| "null".to_string())),
        ["api", "timeout_secs"] => Ok(config.api.timeout_secs.to_string()),
        ["builder", "image_axis"] => Ok(format!("\"{}\"", config.builder.image_axis)),
        ["builder", "enforce_image_coupling"] => {
            Ok(config.builder.enforce_image_coupling.to_string())
        }
        ["builder", "max_image_bytes"] => Ok(config.builder.max_image_bytes.to_string()),
        ["session", "path"] => Ok(config
            .session
            .path
            .as_ref()
            .map(|p| format!("\"{}\"", p.display()))
            .unwrap_or_else(|| "null".to_string())),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["api", "base_url"] => config.api.base_url = value.to_string(),
        ["api", "client_id"] => config.api.client_id = Some(value.to_string()),
        ["api", "timeout_secs"] => config.api.timeout_secs = value.parse()?,
        ["builder", "image_axis"] => config.builder.image_axis = value.to_string(),
        ["builder", "enforce_image_coupling"] => {
            config.builder.enforce_image_coupling = value.parse()?
        }
        ["builder", "max_image_bytes"] => config.builder.max_image_bytes = value.parse()?,
        ["session", "path"] => config.session.path = Some(PathBuf::from(value)),
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
