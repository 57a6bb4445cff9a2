//! HTTP-backed registry client

use crate::client::{InstalledHandle, PackageDescriptor, RegistryClient, Resolution};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use warden_core::{Error, Result};

/// Registry client fetching package metadata and artifacts over HTTPS
///
/// Metadata lives at `{base}/packages/{identifier}.json`; a 404 there is the
/// expected "not found" condition. Artifacts are downloaded into the
/// platform package directory and checksum-verified when the descriptor
/// carries a digest.
pub struct HttpRegistryClient {
    base_url: Url,
    package_dir: PathBuf,
    client: reqwest::Client,
}

impl HttpRegistryClient {
    /// Create a client against the given registry base URL
    pub fn new(base_url: Url, package_dir: PathBuf, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::invalid_config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            package_dir,
            client,
        })
    }

    fn metadata_url(&self, identifier: &str) -> Result<Url> {
        self.base_url
            .join(&format!("packages/{identifier}.json"))
            .map_err(|e| Error::registry_lookup(identifier, format!("invalid package url: {e}")))
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn resolve_package(&self, identifier: &str) -> Result<Resolution> {
        let url = self.metadata_url(identifier)?;
        debug!("Resolving package '{identifier}' via {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::registry_lookup(identifier, e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("Package '{identifier}' not found in registry");
            return Ok(Resolution::NotFound);
        }
        if !response.status().is_success() {
            return Err(Error::registry_lookup(
                identifier,
                format!("HTTP {}", response.status()),
            ));
        }

        let descriptor: PackageDescriptor = response
            .json()
            .await
            .map_err(|e| Error::registry_lookup(identifier, format!("malformed metadata: {e}")))?;

        if descriptor.identifier != identifier {
            return Err(Error::registry_lookup(
                identifier,
                format!(
                    "metadata identifier mismatch: registry says '{}'",
                    descriptor.identifier
                ),
            ));
        }

        Ok(Resolution::Found(descriptor))
    }

    async fn install(&self, descriptor: &PackageDescriptor) -> Result<InstalledHandle> {
        let identifier = &descriptor.identifier;
        info!(
            "Downloading package '{identifier}' {} from {}",
            descriptor.version, descriptor.download_url
        );

        let response = self
            .client
            .get(&descriptor.download_url)
            .send()
            .await
            .map_err(|e| Error::install(identifier, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::install(
                identifier,
                format!("download failed: HTTP {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::install(identifier, e.to_string()))?;

        if let Some(expected) = &descriptor.checksum {
            let actual = hex::encode(Sha256::digest(&bytes));
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(Error::install(
                    identifier,
                    format!("checksum mismatch: expected {expected}, got {actual}"),
                ));
            }
        } else {
            warn!("Package '{identifier}' has no checksum; skipping verification");
        }

        std::fs::create_dir_all(&self.package_dir)
            .map_err(|e| Error::install(identifier, e.to_string()))?;

        let artifact_path = self
            .package_dir
            .join(format!("{identifier}-{}.pkg", descriptor.version));
        std::fs::write(&artifact_path, &bytes)
            .map_err(|e| Error::install(identifier, e.to_string()))?;

        info!("Installed package '{identifier}' at {:?}", artifact_path);
        Ok(InstalledHandle {
            identifier: identifier.clone(),
            path: artifact_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn test_client(dir: &std::path::Path) -> HttpRegistryClient {
        HttpRegistryClient::new(
            Url::parse("https://registry.example.com").unwrap(),
            dir.to_path_buf(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_metadata_url_layout() {
        let dir = tempfile::tempdir().unwrap();
        let client = test_client(dir.path());
        let url = client.metadata_url("seo-toolkit").unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/packages/seo-toolkit.json"
        );
    }

    #[test]
    fn test_descriptor_deserialization() {
        let json = r#"{
            "identifier": "seo-toolkit",
            "name": "SEO Toolkit",
            "version": "2.1.0",
            "download_url": "https://registry.example.com/artifacts/seo-toolkit-2.1.0.pkg",
            "checksum": "ab12"
        }"#;
        let desc: PackageDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.version, Version::new(2, 1, 0));
        assert_eq!(desc.checksum.as_deref(), Some("ab12"));
    }
}
