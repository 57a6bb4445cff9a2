//! Configuration commands

use crate::cli::{ConfigCommands, ConfigShowArgs, ConfigValidateArgs};
use crate::output;
use crate::utils::load_config;
use anyhow::Result;
use camino::Utf8Path;

/// Main entry point for config subcommands
pub fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Validate(args) => validate(args, config_path),
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

/// Validate the configuration file
fn validate(_args: ConfigValidateArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    output::success(&format!("{} is valid", config.config_path));
    output::kv(
        "desired extensions",
        &config.config.extensions.len().to_string(),
    );
    output::kv(
        "canonical keys",
        &config.config.fleet.canonical_keys.len().to_string(),
    );
    Ok(())
}

/// Show the resolved configuration
fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.config)?);
        return Ok(());
    }

    output::header("Warden configuration");
    output::kv("config file", config.config_path.as_str());
    output::kv("state dir", &config.state_dir()?.display().to_string());
    output::kv("registry", &config.config.registry.url);
    output::kv(
        "primary tenant",
        &config.config.fleet.primary_tenant.to_string(),
    );

    output::header("Desired extensions");
    for ext in config.config.extensions.iter() {
        output::kv(&ext.id, &ext.name);
    }
    Ok(())
}
