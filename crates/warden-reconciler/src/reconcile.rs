//! Desired-vs-installed extension reconciliation

use serde::Serialize;
use tracing::{debug, info, warn};
use warden_core::config::DesiredExtensionSet;
use warden_core::types::{InstalledExtension, RequiredExtension};
use warden_core::{Error, Result};
use warden_platform::ExtensionHost;
use warden_registry::{RegistryClient, Resolution};

/// What happened to one desired identifier during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Package was installed (and activated) this pass
    Installed,
    /// Package was already installed and only needed activation
    Activated,
    /// Already installed and active; nothing to do
    Unchanged,
}

/// Result of one reconciliation pass
#[derive(Debug, Default, Serialize)]
pub struct ReconcileReport {
    /// Identifiers installed this pass
    pub installed: Vec<String>,

    /// Identifiers activated this pass (already installed)
    pub activated: Vec<String>,

    /// Identifiers already converged
    pub unchanged: Vec<String>,

    /// Per-identifier failures (identifier, reason); the pass continued
    /// past every one of these
    pub failed: Vec<(String, String)>,
}

impl ReconcileReport {
    /// Whether every desired identifier is converged
    pub fn is_converged(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether the pass changed any platform state
    pub fn changed(&self) -> bool {
        !self.installed.is_empty() || !self.activated.is_empty()
    }

    fn record(&mut self, identifier: &str, outcome: Outcome) {
        let bucket = match outcome {
            Outcome::Installed => &mut self.installed,
            Outcome::Activated => &mut self.activated,
            Outcome::Unchanged => &mut self.unchanged,
        };
        bucket.push(identifier.to_string());
    }
}

/// Stateless reconciler converging platform extensions toward the desired set
pub struct ExtensionReconciler<'a> {
    host: &'a dyn ExtensionHost,
    registry: &'a dyn RegistryClient,
    desired: &'a DesiredExtensionSet,
}

impl<'a> ExtensionReconciler<'a> {
    /// Create a reconciler over the given platform and registry
    pub fn new(
        host: &'a dyn ExtensionHost,
        registry: &'a dyn RegistryClient,
        desired: &'a DesiredExtensionSet,
    ) -> Self {
        Self {
            host,
            registry,
            desired,
        }
    }

    /// Run one reconciliation pass
    ///
    /// Idempotent: a second pass against unchanged platform state performs
    /// no install or activate calls. Failures are recorded per identifier
    /// and never escalate past this method.
    pub async fn reconcile(&self) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for ext in self.desired.iter() {
            match self.converge_one(ext).await {
                Ok(outcome) => report.record(&ext.id, outcome),
                Err(e) => {
                    warn!("Extension '{}' not converged: {e}", ext.id);
                    report.failed.push((ext.id.clone(), e.to_string()));
                }
            }
        }

        info!(
            "Reconcile pass: {} installed, {} activated, {} unchanged, {} failed",
            report.installed.len(),
            report.activated.len(),
            report.unchanged.len(),
            report.failed.len()
        );
        report
    }

    /// Converge a single desired extension
    async fn converge_one(&self, ext: &RequiredExtension) -> Result<Outcome> {
        let mut freshly_installed = false;

        if self.host.find(&ext.id)?.is_none() {
            self.install_missing(ext).await?;
            freshly_installed = true;
        }

        // Re-resolve after installation; the registry client may have just
        // put the package in place.
        let Some(installed) = self.host.find(&ext.id)? else {
            return Err(Error::install(&ext.id, "not visible after installation"));
        };

        if !installed.active {
            self.host.activate(&ext.id)?;
            return Ok(if freshly_installed {
                Outcome::Installed
            } else {
                Outcome::Activated
            });
        }

        debug!("Extension '{}' already installed and active", ext.id);
        Ok(Outcome::Unchanged)
    }

    /// Resolve and install one absent extension
    async fn install_missing(&self, ext: &RequiredExtension) -> Result<()> {
        info!("Extension '{}' ({}) is absent; installing", ext.id, ext.name);

        let descriptor = match self.registry.resolve_package(&ext.id).await? {
            Resolution::Found(descriptor) => descriptor,
            Resolution::NotFound => {
                return Err(Error::registry_lookup(&ext.id, "package not found"));
            }
        };

        let handle = self.registry.install(&descriptor).await?;
        self.host.register(InstalledExtension::new(
            &ext.id,
            handle.path.to_string_lossy().into_owned(),
        ))
    }
}
