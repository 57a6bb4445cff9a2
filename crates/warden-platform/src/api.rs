//! Platform capability API traits

use warden_core::types::{
    ContentItem, InstalledExtension, NewContentItem, SettingValue, TenantId,
};
use warden_core::Result;

/// Platform-level extension subsystem
///
/// The reconciler reads installed state through this trait and requests
/// mutation (register, activate); it never owns the state itself.
pub trait ExtensionHost: Send + Sync {
    /// All installed extensions, in storage order
    fn installed(&self) -> Result<Vec<InstalledExtension>>;

    /// Find an installed extension by exact identifier
    fn find(&self, identifier: &str) -> Result<Option<InstalledExtension>> {
        Ok(self
            .installed()?
            .into_iter()
            .find(|ext| ext.identifier == identifier))
    }

    /// Record a newly installed extension
    ///
    /// Re-registering an existing identifier replaces the stored handle and
    /// preserves the activation flag.
    fn register(&self, extension: InstalledExtension) -> Result<()>;

    /// Activate an installed extension (idempotent)
    fn activate(&self, identifier: &str) -> Result<()>;
}

/// Per-tenant settings and content operations
///
/// Every call names its tenant explicitly; there is no ambient-only write
/// path. Writes are independent per tenant; no cross-tenant transaction.
pub trait TenantStore: Send + Sync {
    /// Read one setting
    fn get_setting(&self, tenant: TenantId, key: &str) -> Result<Option<SettingValue>>;

    /// Write one setting (last-write-wins)
    fn set_setting(&self, tenant: TenantId, key: &str, value: SettingValue) -> Result<()>;

    /// Apply a settings table in order (last-write-wins, no merge)
    fn apply_settings(&self, tenant: TenantId, entries: &[(String, SettingValue)]) -> Result<()> {
        for (key, value) in entries {
            self.set_setting(tenant, key, value.clone())?;
        }
        Ok(())
    }

    /// Create a content item, returning its id
    fn create_content(&self, tenant: TenantId, item: NewContentItem) -> Result<u64>;

    /// All content items of a tenant
    fn content_items(&self, tenant: TenantId) -> Result<Vec<ContentItem>>;

    /// Bulk-close comments on every currently open content item
    ///
    /// Returns the number of items updated. A single bulk state update, not
    /// a per-item loop visible to callers.
    fn close_open_comments(&self, tenant: TenantId) -> Result<u64>;
}
