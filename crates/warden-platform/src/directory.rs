//! Tenant directory trait

use warden_core::types::{Tenant, TenantId};
use warden_core::Result;

/// Enumerates tenants and tracks the ambient "current tenant"
///
/// Enumeration order is the backend's; callers must not rely on any
/// cross-tenant ordering guarantee.
pub trait TenantDirectory: Send + Sync {
    /// All tenants, in the backend's enumeration order
    fn list_tenants(&self) -> Result<Vec<Tenant>>;

    /// Look up one tenant
    fn get_tenant(&self, id: TenantId) -> Result<Tenant>;

    /// The ambient current tenant
    fn current_tenant(&self) -> TenantId;

    /// Switch the ambient current tenant, returning the previous one
    ///
    /// Fails with `Error::TenantContextSwitch` when the target tenant does
    /// not exist. Prefer [`crate::TenantScope`] over calling this directly:
    /// the scope guard guarantees restoration.
    fn switch_tenant(&self, id: TenantId) -> Result<TenantId>;
}
