//! Fleet-wide settings synchronization

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};
use warden_core::types::{SettingValue, TenantId};
use warden_core::Result;
use warden_platform::{with_tenant_context, TenantDirectory, TenantStore};

/// Result of an initialization sweep
#[derive(Debug, Default, Serialize)]
pub struct InitReport {
    /// Tenants initialized
    pub initialized: Vec<TenantId>,

    /// Total content items whose comments were bulk-closed
    pub comments_closed: u64,

    /// Tenants skipped after a write failure (id, reason)
    pub failed: Vec<(TenantId, String)>,
}

/// Result of a canonical-settings sync pass
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    /// Non-primary tenants whose canonical keys were overwritten
    pub synced: Vec<TenantId>,

    /// Tenants skipped after a write failure (id, reason)
    pub failed: Vec<(TenantId, String)>,

    /// Canonical keys read from the primary this pass
    pub keys: Vec<String>,
}

/// Copies canonical settings from the designated primary tenant to all
/// others, and forces fleet-wide comment defaults.
///
/// Per-tenant writes are independent: a failure on one tenant is recorded
/// and iteration continues. Tenant iteration order is the directory's
/// enumeration order; no cross-tenant ordering is guaranteed.
pub struct FleetSynchronizer<'a> {
    directory: &'a dyn TenantDirectory,
    store: &'a dyn TenantStore,
    primary: TenantId,
    canonical_keys: &'a [String],
}

impl<'a> FleetSynchronizer<'a> {
    /// Create a synchronizer for the given fleet
    pub fn new(
        directory: &'a dyn TenantDirectory,
        store: &'a dyn TenantStore,
        primary: TenantId,
        canonical_keys: &'a [String],
    ) -> Self {
        Self {
            directory,
            store,
            primary,
            canonical_keys,
        }
    }

    /// Force comment/ping defaults closed and bulk-close open comment
    /// status on every tenant (the primary included)
    pub fn initialize_all_tenants(&self) -> Result<InitReport> {
        let mut report = InitReport::default();

        for tenant in self.directory.list_tenants()? {
            let result = with_tenant_context(self.directory, tenant.id, |id| {
                self.store
                    .set_setting(id, "default_comment_status", json!("closed"))?;
                self.store
                    .set_setting(id, "default_ping_status", json!("closed"))?;
                self.store.close_open_comments(id)
            });
            match result {
                Ok(closed) => {
                    report.comments_closed += closed;
                    report.initialized.push(tenant.id);
                }
                Err(e) => {
                    warn!("Initialization skipped tenant {}: {e}", tenant.id);
                    report.failed.push((tenant.id, e.to_string()));
                }
            }
        }

        info!(
            "Initialized {} tenants ({} comment statuses closed, {} failed)",
            report.initialized.len(),
            report.comments_closed,
            report.failed.len()
        );
        Ok(report)
    }

    /// Overwrite each canonical key on every non-primary tenant with the
    /// primary's value at pass start
    ///
    /// The primary is read once; tenants customized away from the canonical
    /// value are overwritten unconditionally. After a successful pass every
    /// non-primary tenant matches the primary snapshot; staleness is at
    /// most one sync interval.
    pub fn sync_all_tenants(&self) -> Result<SyncReport> {
        let canonical = self.read_canonical()?;
        let mut report = SyncReport {
            keys: canonical.iter().map(|(k, _)| k.clone()).collect(),
            ..Default::default()
        };

        for tenant in self.directory.list_tenants()? {
            if tenant.id == self.primary {
                continue;
            }
            let result = with_tenant_context(self.directory, tenant.id, |id| {
                self.store.apply_settings(id, &canonical)
            });
            match result {
                Ok(()) => report.synced.push(tenant.id),
                Err(e) => {
                    warn!("Sync skipped tenant {}: {e}", tenant.id);
                    report.failed.push((tenant.id, e.to_string()));
                }
            }
        }

        info!(
            "Synced {} canonical keys to {} tenants ({} failed)",
            report.keys.len(),
            report.synced.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Snapshot the canonical key values from the primary tenant
    fn read_canonical(&self) -> Result<Vec<(String, SettingValue)>> {
        let mut values = Vec::with_capacity(self.canonical_keys.len());
        for key in self.canonical_keys {
            match self.store.get_setting(self.primary, key)? {
                Some(value) => values.push((key.clone(), value)),
                None => debug!("Primary tenant has no value for canonical key '{key}'"),
            }
        }
        Ok(values)
    }
}
