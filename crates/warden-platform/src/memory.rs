//! Recording in-memory platform backend
//!
//! Implements the full platform boundary without side effects, records
//! every mutating call, and supports injected per-tenant write failures.
//! Used by reconciler/fleet tests and for dry-run style verification.

use crate::api::{ExtensionHost, TenantStore};
use crate::directory::TenantDirectory;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use warden_core::types::{
    CommentStatus, ContentItem, InstalledExtension, NewContentItem, SettingValue, Tenant,
    TenantId,
};
use warden_core::{Error, Result};

/// One recorded mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(String),
    Activate(String),
    SetSetting(TenantId, String),
    CreateContent(TenantId, String),
    CloseOpenComments(TenantId),
    SwitchTenant(TenantId),
}

#[derive(Default)]
struct State {
    tenants: BTreeMap<TenantId, Tenant>,
    extensions: Vec<InstalledExtension>,
    current: Option<TenantId>,
}

/// In-memory platform with call recording and failure injection
#[derive(Default)]
pub struct MemoryPlatform {
    state: Mutex<State>,
    calls: Mutex<Vec<Call>>,
    failing_tenants: Mutex<HashSet<TenantId>>,
    failing_titles: Mutex<HashSet<String>>,
}

impl MemoryPlatform {
    /// Create an empty platform
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a platform with bare tenants for the given ids
    ///
    /// The first id becomes the ambient current tenant.
    pub fn with_tenants(ids: impl IntoIterator<Item = u64>) -> Self {
        let platform = Self::new();
        for id in ids {
            platform.add_tenant(Tenant::new(
                TenantId(id),
                format!("tenant{id}.example.net"),
                "/",
            ));
        }
        platform
    }

    /// Add a tenant record
    pub fn add_tenant(&self, tenant: Tenant) {
        let mut state = self.state.lock().unwrap();
        state.current.get_or_insert(tenant.id);
        state.tenants.insert(tenant.id, tenant);
    }

    /// Pre-seed an installed extension
    pub fn add_extension(&self, extension: InstalledExtension) {
        self.state.lock().unwrap().extensions.push(extension);
    }

    /// Make every write for the given tenant fail with `PersistenceWrite`
    pub fn fail_writes_for(&self, tenant: TenantId) {
        self.failing_tenants.lock().unwrap().insert(tenant);
    }

    /// Make creation of content items with the given title fail
    pub fn fail_content_titled(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    /// All recorded mutating calls, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded `Register` calls
    pub fn register_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Register(_)))
    }

    /// Number of recorded `Activate` calls
    pub fn activate_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Activate(_)))
    }

    /// Number of recorded settings writes for one tenant
    pub fn setting_writes_for(&self, tenant: TenantId) -> usize {
        self.count(|c| matches!(c, Call::SetSetting(t, _) if *t == tenant))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_writable(&self, tenant: TenantId, key: &str) -> Result<()> {
        if self.failing_tenants.lock().unwrap().contains(&tenant) {
            return Err(Error::persistence_write(tenant, key));
        }
        Ok(())
    }
}

impl TenantDirectory for MemoryPlatform {
    fn list_tenants(&self) -> Result<Vec<Tenant>> {
        Ok(self.state.lock().unwrap().tenants.values().cloned().collect())
    }

    fn get_tenant(&self, id: TenantId) -> Result<Tenant> {
        self.state
            .lock()
            .unwrap()
            .tenants
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownTenant { tenant: id })
    }

    fn current_tenant(&self) -> TenantId {
        self.state
            .lock()
            .unwrap()
            .current
            .expect("no tenants registered")
    }

    fn switch_tenant(&self, id: TenantId) -> Result<TenantId> {
        let mut state = self.state.lock().unwrap();
        if !state.tenants.contains_key(&id) {
            return Err(Error::TenantContextSwitch { tenant: id });
        }
        let previous = state.current.replace(id).unwrap_or(id);
        drop(state);
        self.record(Call::SwitchTenant(id));
        Ok(previous)
    }
}

impl TenantStore for MemoryPlatform {
    fn get_setting(&self, tenant: TenantId, key: &str) -> Result<Option<SettingValue>> {
        let state = self.state.lock().unwrap();
        let record = state
            .tenants
            .get(&tenant)
            .ok_or(Error::UnknownTenant { tenant })?;
        Ok(record.settings.get(key).cloned())
    }

    fn set_setting(&self, tenant: TenantId, key: &str, value: SettingValue) -> Result<()> {
        self.check_writable(tenant, key)?;
        let mut state = self.state.lock().unwrap();
        let record = state
            .tenants
            .get_mut(&tenant)
            .ok_or(Error::UnknownTenant { tenant })?;
        record.settings.insert(key.to_string(), value);
        drop(state);
        self.record(Call::SetSetting(tenant, key.to_string()));
        Ok(())
    }

    fn create_content(&self, tenant: TenantId, item: NewContentItem) -> Result<u64> {
        self.check_writable(tenant, &item.title)?;
        if self.failing_titles.lock().unwrap().contains(&item.title) {
            return Err(Error::persistence_write(tenant, item.title.clone()));
        }
        let mut state = self.state.lock().unwrap();
        let record = state
            .tenants
            .get_mut(&tenant)
            .ok_or(Error::UnknownTenant { tenant })?;
        let id = record.content.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let title = item.title.clone();
        record.content.push(ContentItem {
            id,
            title: item.title,
            body: item.body,
            status: item.status,
            comment_status: item.comment_status,
        });
        drop(state);
        self.record(Call::CreateContent(tenant, title));
        Ok(id)
    }

    fn content_items(&self, tenant: TenantId) -> Result<Vec<ContentItem>> {
        let state = self.state.lock().unwrap();
        let record = state
            .tenants
            .get(&tenant)
            .ok_or(Error::UnknownTenant { tenant })?;
        Ok(record.content.clone())
    }

    fn close_open_comments(&self, tenant: TenantId) -> Result<u64> {
        self.check_writable(tenant, "comment_status")?;
        let mut state = self.state.lock().unwrap();
        let record = state
            .tenants
            .get_mut(&tenant)
            .ok_or(Error::UnknownTenant { tenant })?;
        let mut updated = 0;
        for item in &mut record.content {
            if item.comment_status == CommentStatus::Open {
                item.comment_status = CommentStatus::Closed;
                updated += 1;
            }
        }
        drop(state);
        self.record(Call::CloseOpenComments(tenant));
        Ok(updated)
    }
}

impl ExtensionHost for MemoryPlatform {
    fn installed(&self) -> Result<Vec<InstalledExtension>> {
        Ok(self.state.lock().unwrap().extensions.clone())
    }

    fn register(&self, extension: InstalledExtension) -> Result<()> {
        let identifier = extension.identifier.clone();
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .extensions
            .iter_mut()
            .find(|e| e.identifier == extension.identifier)
        {
            existing.handle = extension.handle;
        } else {
            state.extensions.push(extension);
        }
        drop(state);
        self.record(Call::Register(identifier));
        Ok(())
    }

    fn activate(&self, identifier: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let ext = state
            .extensions
            .iter_mut()
            .find(|e| e.identifier == identifier)
            .ok_or_else(|| Error::install(identifier, "not installed"))?;
        if !ext.active {
            ext.active = true;
            drop(state);
            self.record(Call::Activate(identifier.to_string()));
        }
        Ok(())
    }
}
