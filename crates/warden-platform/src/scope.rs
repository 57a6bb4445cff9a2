//! Scoped tenant execution with guaranteed context restoration

use crate::directory::TenantDirectory;
use tracing::warn;
use warden_core::types::TenantId;
use warden_core::Result;

/// RAII guard for scoped execution inside a tenant context
///
/// Switches the directory's ambient tenant on entry and restores the
/// previous tenant when dropped, on every exit path including propagated
/// errors. Subsequent operations can therefore never silently run against
/// the wrong tenant.
pub struct TenantScope<'a> {
    directory: &'a dyn TenantDirectory,
    tenant: TenantId,
    previous: TenantId,
}

impl<'a> TenantScope<'a> {
    /// Switch into the given tenant's context
    pub fn enter(directory: &'a dyn TenantDirectory, tenant: TenantId) -> Result<Self> {
        let previous = directory.switch_tenant(tenant)?;
        Ok(Self {
            directory,
            tenant,
            previous,
        })
    }

    /// The tenant this scope executes as
    pub fn tenant(&self) -> TenantId {
        self.tenant
    }
}

impl std::fmt::Debug for TenantScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantScope")
            .field("tenant", &self.tenant)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}

impl Drop for TenantScope<'_> {
    fn drop(&mut self) {
        // The previous tenant existed when we entered, so restoration can
        // only fail if it was deleted mid-scope.
        if let Err(e) = self.directory.switch_tenant(self.previous) {
            warn!("Failed to restore tenant context to {}: {e}", self.previous);
        }
    }
}

/// Run `f` inside the given tenant's context
///
/// `f` receives the tenant id explicitly; the ambient tenant is restored
/// before this function returns, whether `f` succeeds or fails.
pub fn with_tenant_context<T>(
    directory: &dyn TenantDirectory,
    tenant: TenantId,
    f: impl FnOnce(TenantId) -> Result<T>,
) -> Result<T> {
    let scope = TenantScope::enter(directory, tenant)?;
    f(scope.tenant())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPlatform;
    use warden_core::Error;

    #[test]
    fn test_context_restored_on_success() {
        let platform = MemoryPlatform::with_tenants([1, 2]);
        let before = platform.current_tenant();

        let seen = with_tenant_context(&platform, TenantId(2), Ok).unwrap();
        assert_eq!(seen, TenantId(2));
        assert_eq!(platform.current_tenant(), before);
    }

    #[test]
    fn test_context_restored_on_failure() {
        let platform = MemoryPlatform::with_tenants([1, 2]);
        let before = platform.current_tenant();

        let result: Result<()> = with_tenant_context(&platform, TenantId(2), |tenant| {
            Err(Error::persistence_write(tenant, "timezone_string"))
        });
        assert!(result.is_err());
        assert_eq!(platform.current_tenant(), before);
    }

    #[test]
    fn test_enter_unknown_tenant_fails() {
        let platform = MemoryPlatform::with_tenants([1]);
        let err = TenantScope::enter(&platform, TenantId(99)).unwrap_err();
        assert!(matches!(err, Error::TenantContextSwitch { .. }));
        assert_eq!(platform.current_tenant(), TenantId(1));
    }

    #[test]
    fn test_nested_scopes_unwind_in_order() {
        let platform = MemoryPlatform::with_tenants([1, 2, 3]);

        {
            let outer = TenantScope::enter(&platform, TenantId(2)).unwrap();
            assert_eq!(platform.current_tenant(), TenantId(2));
            {
                let inner = TenantScope::enter(&platform, TenantId(3)).unwrap();
                assert_eq!(inner.tenant(), TenantId(3));
                assert_eq!(platform.current_tenant(), TenantId(3));
            }
            assert_eq!(platform.current_tenant(), outer.tenant());
        }
        assert_eq!(platform.current_tenant(), TenantId(1));
    }
}
