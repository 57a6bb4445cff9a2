//! Shared type definitions for Warden
//!
//! Split by concern:
//! - `tenant_types`: tenants, settings, content items
//! - `extension_types`: desired/installed extension records
//! - `capability_types`: actors, roles, and capability grants

mod capability_types;
mod extension_types;
mod tenant_types;

pub use capability_types::{Actor, Capability, Grant, Role};
pub use extension_types::{InstalledExtension, RequiredExtension};
pub use tenant_types::{
    CommentStatus, ContentItem, NewContentItem, SettingValue, Tenant, TenantId,
};
