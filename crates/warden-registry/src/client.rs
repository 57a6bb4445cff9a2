//! Registry client trait and package descriptor types

use async_trait::async_trait;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use warden_core::Result;

/// Downloadable package metadata returned by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Extension identifier
    pub identifier: String,

    /// Display name
    pub name: String,

    /// Package version
    pub version: Version,

    /// Artifact download URL
    pub download_url: String,

    /// Optional sha256 checksum (hex) of the artifact
    #[serde(default)]
    pub checksum: Option<String>,
}

/// Outcome of a package lookup
///
/// `NotFound` is an expected condition, distinct from lookup errors.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The registry knows this identifier
    Found(PackageDescriptor),
    /// The registry has no package for this identifier
    NotFound,
}

impl Resolution {
    /// Unwrap the descriptor if found
    pub fn found(self) -> Option<PackageDescriptor> {
        match self {
            Resolution::Found(desc) => Some(desc),
            Resolution::NotFound => None,
        }
    }
}

/// Handle to an installed package artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledHandle {
    /// Extension identifier
    pub identifier: String,

    /// Location of the installed artifact
    pub path: PathBuf,
}

/// Registry operations used by the extension reconciler
///
/// Implementations must have host-imposed timeouts on every network
/// operation; a hung lookup would otherwise stall the whole pass.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Resolve an extension identifier to a package descriptor
    ///
    /// Returns `Ok(Resolution::NotFound)` when the registry has no such
    /// package; `Err(Error::RegistryLookup)` for transport failures or
    /// malformed metadata.
    async fn resolve_package(&self, identifier: &str) -> Result<Resolution>;

    /// Download and install the package artifact
    ///
    /// Returns `Err(Error::Install)` on download or checksum failure.
    async fn install(&self, descriptor: &PackageDescriptor) -> Result<InstalledHandle>;
}
