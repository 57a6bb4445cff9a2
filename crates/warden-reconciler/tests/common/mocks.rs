//! Mock registry client
//!
//! Pre-configured resolutions plus recorded invocations, without network
//! side effects.

use async_trait::async_trait;
use semver::Version;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use warden_core::{Error, Result};
use warden_registry::{InstalledHandle, PackageDescriptor, RegistryClient, Resolution};

/// Mock registry with per-identifier behavior
#[derive(Default)]
pub struct MockRegistry {
    packages: HashMap<String, PackageDescriptor>,
    lookup_errors: HashSet<String>,
    install_errors: HashSet<String>,
    resolve_calls: Mutex<Vec<String>>,
    install_calls: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry resolves this identifier to a package
    pub fn with_package(mut self, identifier: &str) -> Self {
        self.packages.insert(
            identifier.to_string(),
            PackageDescriptor {
                identifier: identifier.to_string(),
                name: format!("{identifier} (display)"),
                version: Version::new(1, 0, 0),
                download_url: format!("https://registry.test/artifacts/{identifier}-1.0.0.pkg"),
                checksum: None,
            },
        );
        self
    }

    /// Lookup of this identifier fails with a transport error
    pub fn with_lookup_error(mut self, identifier: &str) -> Self {
        self.lookup_errors.insert(identifier.to_string());
        self
    }

    /// Installation of this identifier fails after a successful lookup
    pub fn with_install_error(mut self, identifier: &str) -> Self {
        self.packages.insert(
            identifier.to_string(),
            PackageDescriptor {
                identifier: identifier.to_string(),
                name: identifier.to_string(),
                version: Version::new(1, 0, 0),
                download_url: String::new(),
                checksum: None,
            },
        );
        self.install_errors.insert(identifier.to_string());
        self
    }

    /// Identifiers resolved so far, in order
    pub fn resolve_calls(&self) -> Vec<String> {
        self.resolve_calls.lock().unwrap().clone()
    }

    /// Identifiers installed so far, in order
    pub fn install_calls(&self) -> Vec<String> {
        self.install_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryClient for MockRegistry {
    async fn resolve_package(&self, identifier: &str) -> Result<Resolution> {
        self.resolve_calls.lock().unwrap().push(identifier.to_string());

        if self.lookup_errors.contains(identifier) {
            return Err(Error::registry_lookup(identifier, "connection refused"));
        }
        Ok(match self.packages.get(identifier) {
            Some(descriptor) => Resolution::Found(descriptor.clone()),
            None => Resolution::NotFound,
        })
    }

    async fn install(&self, descriptor: &PackageDescriptor) -> Result<InstalledHandle> {
        self.install_calls
            .lock()
            .unwrap()
            .push(descriptor.identifier.clone());

        if self.install_errors.contains(&descriptor.identifier) {
            return Err(Error::install(&descriptor.identifier, "download failed"));
        }
        Ok(InstalledHandle {
            identifier: descriptor.identifier.clone(),
            path: PathBuf::from(format!(
                "/packages/{}-{}.pkg",
                descriptor.identifier, descriptor.version
            )),
        })
    }
}
