//! Configuration file loading and parsing

use crate::config::WardenConfigFile;
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

/// Configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["warden.yaml", "warden.yml"];

/// Loaded and validated Warden configuration
#[derive(Debug, Clone)]
pub struct WardenConfig {
    /// The parsed configuration
    pub config: WardenConfigFile,

    /// Path to the configuration file
    pub config_path: Utf8PathBuf,

    /// Working directory
    pub working_dir: Utf8PathBuf,
}

impl WardenConfig {
    /// Load configuration from the specified path or search for it
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = if let Some(p) = path {
            let content = fs::read_to_string(p).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(p.as_str())
                } else {
                    Error::Io(e)
                }
            })?;
            (p.to_owned(), content)
        } else {
            Self::find_config()?
        };

        let working_dir = config_path
            .parent()
            .map(|p| p.to_owned())
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        debug!("Loading configuration from {config_path}");
        let config: WardenConfigFile = serde_yaml_ng::from_str(&content)?;

        let loaded = Self {
            config,
            config_path,
            working_dir,
        };
        loaded.validate()?;
        Ok(loaded)
    }

    /// Search the current directory for a config file
    fn find_config() -> Result<(Utf8PathBuf, String)> {
        for name in CONFIG_FILE_NAMES {
            let candidate = Utf8PathBuf::from(name);
            if let Ok(content) = fs::read_to_string(&candidate) {
                return Ok((candidate, content));
            }
        }
        Err(Error::config_not_found(CONFIG_FILE_NAMES[0]))
    }

    /// Validate the parsed configuration
    pub fn validate(&self) -> Result<()> {
        self.config.extensions.validate()?;

        url::Url::parse(&self.config.registry.url)
            .map_err(|e| Error::invalid_config(format!("invalid registry url: {e}")))?;

        if self.config.fleet.admin_threshold_hours <= 0 {
            return Err(Error::invalid_config(
                "fleet.admin_threshold_hours must be positive",
            ));
        }
        if self.config.provisioning.pages.is_empty() {
            return Err(Error::invalid_config(
                "provisioning.pages must not be empty",
            ));
        }
        Ok(())
    }

    /// Resolve the platform state directory (config value or ~/.warden)
    pub fn state_dir(&self) -> Result<std::path::PathBuf> {
        if let Some(dir) = &self.config.platform.state_dir {
            return Ok(dir.as_std_path().to_path_buf());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| Error::invalid_config("could not determine home directory"))?;
        Ok(home.join(".warden"))
    }
}
