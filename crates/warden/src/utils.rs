//! Shared command wiring: config loading and platform/registry construction

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::time::Duration;
use warden_core::WardenConfig;
use warden_platform::FsPlatform;
use warden_registry::HttpRegistryClient;

/// Load and validate warden.yaml
pub fn load_config(path: Option<&Utf8Path>) -> Result<WardenConfig> {
    WardenConfig::load(path).context("Failed to load configuration")
}

/// Open the filesystem platform store for this configuration
pub fn open_platform(config: &WardenConfig) -> Result<FsPlatform> {
    let state_dir = config.state_dir()?;
    FsPlatform::open(state_dir).context("Failed to open platform state")
}

/// Build the HTTP registry client for this configuration
pub fn registry_client(config: &WardenConfig, platform: &FsPlatform) -> Result<HttpRegistryClient> {
    let base_url = url::Url::parse(&config.config.registry.url)
        .context("Invalid registry URL in configuration")?;
    let client = HttpRegistryClient::new(
        base_url,
        platform.package_dir(),
        Duration::from_secs(config.config.registry.timeout_secs),
    )?;
    Ok(client)
}
