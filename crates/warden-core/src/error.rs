//! Error types for warden-core

use thiserror::Error;

use crate::types::TenantId;

/// Result type alias using warden-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Warden
///
/// The four reconciliation-boundary kinds (`RegistryLookup`, `Install`,
/// `TenantContextSwitch`, `PersistenceWrite`) are caught at the operation
/// that produced them and converted into skip-and-continue outcomes; they
/// never cross a reconciliation pass boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry lookup failed for one extension identifier
    #[error("Registry lookup failed for '{identifier}': {reason}")]
    RegistryLookup { identifier: String, reason: String },

    /// Package installation failed for one extension identifier
    #[error("Installation failed for '{identifier}': {reason}")]
    Install { identifier: String, reason: String },

    /// Switching into a tenant execution scope failed
    #[error("Failed to switch into tenant {tenant} context")]
    TenantContextSwitch { tenant: TenantId },

    /// A per-tenant settings/content write failed
    #[error("Failed to persist '{key}' for tenant {tenant}")]
    PersistenceWrite { tenant: TenantId, key: String },

    /// Tenant id not present in the tenant directory
    #[error("Unknown tenant: {tenant}")]
    UnknownTenant { tenant: TenantId },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a registry lookup error
    pub fn registry_lookup(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RegistryLookup {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create an installation error
    pub fn install(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Install {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a persistence write error
    pub fn persistence_write(tenant: TenantId, key: impl Into<String>) -> Self {
        Self::PersistenceWrite {
            tenant,
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::registry_lookup("seo-toolkit", "connection refused");
        assert_eq!(
            err.to_string(),
            "Registry lookup failed for 'seo-toolkit': connection refused"
        );

        let err = Error::persistence_write(TenantId(7), "timezone_string");
        assert_eq!(
            err.to_string(),
            "Failed to persist 'timezone_string' for tenant 7"
        );
    }

    #[test]
    fn test_unknown_tenant_display() {
        let err = Error::UnknownTenant { tenant: TenantId(42) };
        assert_eq!(err.to_string(), "Unknown tenant: 42");
    }
}
