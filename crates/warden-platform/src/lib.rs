//! # warden-platform
//!
//! The platform boundary for Warden: traits for the tenant directory, the
//! per-tenant settings/content store, and the extension host, plus a
//! filesystem-backed store ([`FsPlatform`]) and a recording in-memory
//! store ([`MemoryPlatform`]) for tests and dry runs.
//!
//! Every settings/content operation takes an explicit tenant id; the
//! ambient "current tenant" exists only for scoped execution via
//! [`TenantScope`], which guarantees restoration of the prior tenant on
//! every exit path.

mod api;
mod directory;
mod fs;
mod memory;
mod scope;

pub use api::{ExtensionHost, TenantStore};
pub use directory::TenantDirectory;
pub use fs::FsPlatform;
pub use memory::{Call, MemoryPlatform};
pub use scope::{with_tenant_context, TenantScope};
