//! Filesystem-backed platform store
//!
//! State layout under the platform root (default ~/.warden):
//! ```text
//! extensions.yaml     installed extension records
//! tenants/<id>.yaml   one record per tenant (settings + content)
//! packages/           downloaded package artifacts
//! ```
//!
//! Tenant-record saves go through a temp-file-and-rename so a crash never
//! leaves a half-written record.

use crate::api::{ExtensionHost, TenantStore};
use crate::directory::TenantDirectory;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use warden_core::types::{
    CommentStatus, ContentItem, InstalledExtension, NewContentItem, SettingValue, Tenant,
    TenantId,
};
use warden_core::{Error, Result};

/// Filesystem-backed implementation of the platform boundary traits
pub struct FsPlatform {
    root: PathBuf,
    current: Mutex<Option<TenantId>>,
}

impl FsPlatform {
    /// Open (and create if needed) a platform store at the given root
    ///
    /// The ambient current tenant is seeded from the lowest existing tenant
    /// id; an empty store has no ambient tenant until the first
    /// `create_tenant`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join("tenants"))?;
        fs::create_dir_all(root.join("packages"))?;
        let current = lowest_tenant_id(&root.join("tenants"))?;
        debug!("Opened platform store at {:?}", root);
        Ok(Self {
            root,
            current: Mutex::new(current),
        })
    }

    /// Directory where package artifacts are stored
    pub fn package_dir(&self) -> PathBuf {
        self.root.join("packages")
    }

    fn extensions_path(&self) -> PathBuf {
        self.root.join("extensions.yaml")
    }

    fn tenant_path(&self, id: TenantId) -> PathBuf {
        self.root.join("tenants").join(format!("{id}.yaml"))
    }

    /// Create a new tenant record
    ///
    /// The first tenant of an empty store becomes the ambient current
    /// tenant.
    pub fn create_tenant(&self, tenant: &Tenant) -> Result<()> {
        let path = self.tenant_path(tenant.id);
        if path.exists() {
            return Err(Error::invalid_config(format!(
                "tenant {} already exists",
                tenant.id
            )));
        }
        save_yaml(&path, tenant)?;
        self.current
            .lock()
            .expect("current tenant lock poisoned")
            .get_or_insert(tenant.id);
        info!("Created tenant {} ({})", tenant.id, tenant.domain);
        Ok(())
    }

    fn load_tenant(&self, id: TenantId) -> Result<Tenant> {
        let path = self.tenant_path(id);
        if !path.exists() {
            return Err(Error::UnknownTenant { tenant: id });
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    fn save_tenant(&self, tenant: &Tenant, key: &str) -> Result<()> {
        save_yaml(&self.tenant_path(tenant.id), tenant)
            .map_err(|_| Error::persistence_write(tenant.id, key))
    }

    fn load_extensions(&self) -> Result<Vec<InstalledExtension>> {
        let path = self.extensions_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    fn save_extensions(&self, extensions: &[InstalledExtension]) -> Result<()> {
        save_yaml(&self.extensions_path(), &extensions)
    }
}

/// Lowest tenant id recorded under the tenants directory, if any
fn lowest_tenant_id(dir: &Path) -> Result<Option<TenantId>> {
    let mut lowest: Option<TenantId> = None;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if let Ok(id) = stem.parse::<u64>() {
            let id = TenantId(id);
            lowest = Some(lowest.map_or(id, |l| l.min(id)));
        }
    }
    Ok(lowest)
}

/// Serialize to YAML via a temp file, then rename into place
fn save_yaml<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let yaml = serde_yaml_ng::to_string(value)?;
    let tmp = path.with_extension("yaml.tmp");
    fs::write(&tmp, yaml)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl TenantDirectory for FsPlatform {
    fn list_tenants(&self) -> Result<Vec<Tenant>> {
        let mut tenants = Vec::new();
        for entry in fs::read_dir(self.root.join("tenants"))? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "yaml") {
                let content = fs::read_to_string(&path)?;
                tenants.push(serde_yaml_ng::from_str::<Tenant>(&content)?);
            }
        }
        tenants.sort_by_key(|t| t.id);
        Ok(tenants)
    }

    fn get_tenant(&self, id: TenantId) -> Result<Tenant> {
        self.load_tenant(id)
    }

    fn current_tenant(&self) -> TenantId {
        self.current
            .lock()
            .expect("current tenant lock poisoned")
            .expect("no tenants registered")
    }

    fn switch_tenant(&self, id: TenantId) -> Result<TenantId> {
        if !self.tenant_path(id).exists() {
            return Err(Error::TenantContextSwitch { tenant: id });
        }
        let mut current = self.current.lock().expect("current tenant lock poisoned");
        let previous = current.replace(id).unwrap_or(id);
        Ok(previous)
    }
}

impl TenantStore for FsPlatform {
    fn get_setting(&self, tenant: TenantId, key: &str) -> Result<Option<SettingValue>> {
        Ok(self.load_tenant(tenant)?.settings.get(key).cloned())
    }

    fn set_setting(&self, tenant: TenantId, key: &str, value: SettingValue) -> Result<()> {
        let mut record = self.load_tenant(tenant)?;
        record.settings.insert(key.to_string(), value);
        self.save_tenant(&record, key)
    }

    fn apply_settings(&self, tenant: TenantId, entries: &[(String, SettingValue)]) -> Result<()> {
        // One load/save for the whole table; same last-write-wins outcome.
        let mut record = self.load_tenant(tenant)?;
        for (key, value) in entries {
            record.settings.insert(key.clone(), value.clone());
        }
        self.save_tenant(&record, "settings")
    }

    fn create_content(&self, tenant: TenantId, item: NewContentItem) -> Result<u64> {
        let mut record = self.load_tenant(tenant)?;
        let id = record.content.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        record.content.push(ContentItem {
            id,
            title: item.title,
            body: item.body,
            status: item.status,
            comment_status: item.comment_status,
        });
        self.save_tenant(&record, "content")?;
        Ok(id)
    }

    fn content_items(&self, tenant: TenantId) -> Result<Vec<ContentItem>> {
        Ok(self.load_tenant(tenant)?.content)
    }

    fn close_open_comments(&self, tenant: TenantId) -> Result<u64> {
        let mut record = self.load_tenant(tenant)?;
        let mut updated = 0;
        for item in &mut record.content {
            if item.comment_status == CommentStatus::Open {
                item.comment_status = CommentStatus::Closed;
                updated += 1;
            }
        }
        if updated > 0 {
            self.save_tenant(&record, "comment_status")?;
        }
        Ok(updated)
    }
}

impl ExtensionHost for FsPlatform {
    fn installed(&self) -> Result<Vec<InstalledExtension>> {
        self.load_extensions()
    }

    fn register(&self, extension: InstalledExtension) -> Result<()> {
        let mut extensions = self.load_extensions()?;
        if let Some(existing) = extensions
            .iter_mut()
            .find(|e| e.identifier == extension.identifier)
        {
            existing.handle = extension.handle;
        } else {
            extensions.push(extension);
        }
        self.save_extensions(&extensions)
    }

    fn activate(&self, identifier: &str) -> Result<()> {
        let mut extensions = self.load_extensions()?;
        let ext = extensions
            .iter_mut()
            .find(|e| e.identifier == identifier)
            .ok_or_else(|| Error::install(identifier, "not installed"))?;
        if !ext.active {
            ext.active = true;
            self.save_extensions(&extensions)?;
            info!("Activated extension '{identifier}'");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn platform_with_tenants(dir: &tempfile::TempDir, ids: &[u64]) -> FsPlatform {
        let platform = FsPlatform::open(dir.path()).unwrap();
        for &id in ids {
            platform
                .create_tenant(&Tenant::new(TenantId(id), format!("t{id}.example.net"), "/"))
                .unwrap();
        }
        platform
    }

    #[test]
    fn test_first_tenant_becomes_ambient_current() {
        let dir = tempfile::tempdir().unwrap();
        let platform = FsPlatform::open(dir.path()).unwrap();

        // No tenant 1 exists; the first created tenant is the ambient one.
        platform
            .create_tenant(&Tenant::new(TenantId(7), "t7.example.net", "/"))
            .unwrap();
        assert_eq!(platform.current_tenant(), TenantId(7));

        // Scope entry and restore work without any other tenant on disk.
        crate::scope::with_tenant_context(&platform, TenantId(7), Ok).unwrap();
        assert_eq!(platform.current_tenant(), TenantId(7));
    }

    #[test]
    fn test_reopened_store_seeds_current_from_lowest_id() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[5, 2]);
        drop(platform);

        let reopened = FsPlatform::open(dir.path()).unwrap();
        assert_eq!(reopened.current_tenant(), TenantId(2));
    }

    #[test]
    fn test_tenant_enumeration_sorted_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[3, 1, 2]);
        let ids: Vec<_> = platform
            .list_tenants()
            .unwrap()
            .into_iter()
            .map(|t| t.id.0)
            .collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[1]);

        platform
            .set_setting(TenantId(1), "timezone_string", json!("America/New_York"))
            .unwrap();
        assert_eq!(
            platform.get_setting(TenantId(1), "timezone_string").unwrap(),
            Some(json!("America/New_York"))
        );
        assert_eq!(platform.get_setting(TenantId(1), "missing").unwrap(), None);
    }

    #[test]
    fn test_unknown_tenant_errors() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[1]);

        assert!(matches!(
            platform.get_setting(TenantId(9), "k").unwrap_err(),
            Error::UnknownTenant { .. }
        ));
        assert!(matches!(
            platform.switch_tenant(TenantId(9)).unwrap_err(),
            Error::TenantContextSwitch { .. }
        ));
    }

    #[test]
    fn test_content_ids_increment() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[1]);

        let a = platform
            .create_content(TenantId(1), NewContentItem::page("Home", "hi"))
            .unwrap();
        let b = platform
            .create_content(TenantId(1), NewContentItem::page("About", "us"))
            .unwrap();
        assert_eq!((a, b), (1, 2));
    }

    #[test]
    fn test_close_open_comments_bulk() {
        let dir = tempfile::tempdir().unwrap();
        let platform = platform_with_tenants(&dir, &[1]);

        let mut open = NewContentItem::page("Open", "x");
        open.comment_status = CommentStatus::Open;
        platform.create_content(TenantId(1), open.clone()).unwrap();
        platform.create_content(TenantId(1), open).unwrap();
        platform
            .create_content(TenantId(1), NewContentItem::page("Closed", "y"))
            .unwrap();

        assert_eq!(platform.close_open_comments(TenantId(1)).unwrap(), 2);
        assert_eq!(platform.close_open_comments(TenantId(1)).unwrap(), 0);
    }

    #[test]
    fn test_register_preserves_activation() {
        let dir = tempfile::tempdir().unwrap();
        let platform = FsPlatform::open(dir.path()).unwrap();

        platform
            .register(InstalledExtension::new("seo-toolkit", "pkg-1.0"))
            .unwrap();
        platform.activate("seo-toolkit").unwrap();
        platform
            .register(InstalledExtension::new("seo-toolkit", "pkg-2.0"))
            .unwrap();

        let ext = platform.find("seo-toolkit").unwrap().unwrap();
        assert!(ext.active);
        assert_eq!(ext.handle, "pkg-2.0");
    }

    #[test]
    fn test_activate_unknown_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let platform = FsPlatform::open(dir.path()).unwrap();
        assert!(platform.activate("ghost").is_err());
    }
}
