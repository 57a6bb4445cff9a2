//! Tenant and per-tenant state type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque setting value stored against a tenant settings key
pub type SettingValue = serde_json::Value;

/// Identifier of one tenant site within the platform
///
/// Tenant identity is immutable for the lifetime of the tenant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TenantId(pub u64);

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TenantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One logical site/instance within the multi-tenant platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Immutable tenant identifier
    pub id: TenantId,

    /// Tenant domain (e.g., "alpha.example.net")
    pub domain: String,

    /// Path component under the domain
    #[serde(default = "default_path")]
    pub path: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Mutable settings map (key -> opaque value)
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,

    /// Content items owned by this tenant
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

fn default_path() -> String {
    "/".to_string()
}

impl Tenant {
    /// Create a new tenant record with empty settings and content
    pub fn new(id: TenantId, domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            domain: domain.into(),
            path: path.into(),
            created_at: Utc::now(),
            settings: BTreeMap::new(),
            content: Vec::new(),
        }
    }
}

/// Comment status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Open,
    Closed,
}

/// A content item (page/post) stored on a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item id, unique within the tenant
    pub id: u64,

    /// Item title
    pub title: String,

    /// Item body
    pub body: String,

    /// Publication status (e.g., "publish", "draft")
    pub status: String,

    /// Whether comments are open on this item
    pub comment_status: CommentStatus,
}

/// Request to create a content item on a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContentItem {
    /// Item title
    pub title: String,

    /// Item body
    pub body: String,

    /// Publication status
    #[serde(default = "default_status")]
    pub status: String,

    /// Initial comment status
    #[serde(default = "default_comment_status")]
    pub comment_status: CommentStatus,
}

fn default_status() -> String {
    "publish".to_string()
}

fn default_comment_status() -> CommentStatus {
    CommentStatus::Closed
}

impl NewContentItem {
    /// Create a published page with closed comments
    pub fn page(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            status: default_status(),
            comment_status: default_comment_status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_roundtrip() {
        let id = TenantId(3);
        let yaml = serde_yaml_ng::to_string(&id).unwrap();
        assert_eq!(yaml.trim(), "3");
        let back: TenantId = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_new_tenant_is_empty() {
        let tenant = Tenant::new(TenantId(1), "alpha.example.net", "/");
        assert!(tenant.settings.is_empty());
        assert!(tenant.content.is_empty());
    }

    #[test]
    fn test_page_defaults() {
        let page = NewContentItem::page("Home", "Welcome");
        assert_eq!(page.status, "publish");
        assert_eq!(page.comment_status, CommentStatus::Closed);
    }
}
