//! Configuration type definitions for warden.yaml

use crate::error::{Error, Result};
use crate::types::{RequiredExtension, SettingValue};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

/// Title of the provisioned page promoted to the tenant's front page
pub const FRONT_PAGE_TITLE: &str = "Home";

/// Top-level warden.yaml structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfigFile {
    /// Platform state location
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Extension registry endpoint
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Desired extension set
    #[serde(default)]
    pub extensions: DesiredExtensionSet,

    /// Fleet synchronization settings
    #[serde(default)]
    pub fleet: FleetConfig,

    /// Tenant provisioning template
    #[serde(default)]
    pub provisioning: ProvisioningConfig,
}

/// Platform state configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// State directory; defaults to ~/.warden when unset
    #[serde(default)]
    pub state_dir: Option<Utf8PathBuf>,
}

/// Extension registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the package registry
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_registry_timeout")]
    pub timeout_secs: u64,
}

fn default_registry_timeout() -> u64 {
    30
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://registry.warden.dev".to_string(),
            timeout_secs: default_registry_timeout(),
        }
    }
}

/// Ordered desired extension set (identifier -> display name)
///
/// Static configuration: defined at deployment time and read-only to the
/// reconciler. Reconciliation walks entries in declared order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesiredExtensionSet {
    required: Vec<RequiredExtension>,
}

impl DesiredExtensionSet {
    /// Build a set from (identifier, display name) pairs
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            required: entries
                .into_iter()
                .map(|(id, name)| RequiredExtension { id, name })
                .collect(),
        }
    }

    /// Iterate entries in declared order
    pub fn iter(&self) -> impl Iterator<Item = &RequiredExtension> {
        self.required.iter()
    }

    /// Number of desired extensions
    pub fn len(&self) -> usize {
        self.required.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Validate identifier uniqueness
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for ext in &self.required {
            if ext.id.is_empty() {
                return Err(Error::invalid_config("extension identifier must not be empty"));
            }
            if !seen.insert(ext.id.as_str()) {
                return Err(Error::invalid_config(format!(
                    "duplicate extension identifier: {}",
                    ext.id
                )));
            }
        }
        Ok(())
    }
}

/// Fleet synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Tenant whose canonical settings are authoritative
    #[serde(default = "default_primary_tenant")]
    pub primary_tenant: u64,

    /// Settings keys propagated from the primary tenant to all others
    #[serde(default = "default_canonical_keys")]
    pub canonical_keys: Vec<String>,

    /// Minimum hours between admin-context triggered reconciliation passes
    #[serde(default = "default_admin_threshold_hours")]
    pub admin_threshold_hours: i64,
}

fn default_primary_tenant() -> u64 {
    1
}

fn default_canonical_keys() -> Vec<String> {
    [
        "thumbnail_size_w",
        "thumbnail_size_h",
        "medium_size_w",
        "medium_size_h",
        "large_size_w",
        "large_size_h",
        "timezone_string",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_admin_threshold_hours() -> i64 {
    24
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            primary_tenant: default_primary_tenant(),
            canonical_keys: default_canonical_keys(),
            admin_threshold_hours: default_admin_threshold_hours(),
        }
    }
}

/// Named image size (width x height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// A page created during tenant provisioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTemplate {
    /// Page title
    pub title: String,

    /// Page body
    pub body: String,
}

/// Tenant provisioning template applied to every new tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Site description text
    #[serde(default = "default_description")]
    pub description: String,

    /// Permalink pattern
    #[serde(default = "default_permalink")]
    pub permalink_structure: String,

    /// Timezone applied to new tenants
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Thumbnail image dimensions
    #[serde(default = "default_thumbnail")]
    pub thumbnail_size: ImageSize,

    /// Medium image dimensions
    #[serde(default = "default_medium")]
    pub medium_size: ImageSize,

    /// Large image dimensions
    #[serde(default = "default_large")]
    pub large_size: ImageSize,

    /// Pages created on every new tenant, in order
    #[serde(default = "default_pages")]
    pub pages: Vec<PageTemplate>,
}

fn default_description() -> String {
    "Another site in our awesome network".to_string()
}

fn default_permalink() -> String {
    "/%postname%/".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_thumbnail() -> ImageSize {
    ImageSize {
        width: 300,
        height: 300,
    }
}

fn default_medium() -> ImageSize {
    ImageSize {
        width: 600,
        height: 600,
    }
}

fn default_large() -> ImageSize {
    ImageSize {
        width: 1200,
        height: 1200,
    }
}

fn default_pages() -> Vec<PageTemplate> {
    [
        ("Home", "Welcome to our network site!"),
        ("About", "About this site"),
        ("Contact", "Contact us anytime"),
        ("Privacy Policy", "Our privacy commitments to you"),
    ]
    .into_iter()
    .map(|(title, body)| PageTemplate {
        title: title.to_string(),
        body: body.to_string(),
    })
    .collect()
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            description: default_description(),
            permalink_structure: default_permalink(),
            timezone: default_timezone(),
            thumbnail_size: default_thumbnail(),
            medium_size: default_medium(),
            large_size: default_large(),
            pages: default_pages(),
        }
    }
}

impl ProvisioningConfig {
    /// The option -> value table applied unconditionally to new tenants
    /// (last-write-wins, no merge with pre-existing values)
    pub fn settings_table(&self) -> Vec<(String, SettingValue)> {
        vec![
            ("blogdescription".into(), json!(self.description)),
            ("permalink_structure".into(), json!(self.permalink_structure)),
            ("default_comment_status".into(), json!("closed")),
            ("default_ping_status".into(), json!("closed")),
            ("timezone_string".into(), json!(self.timezone)),
            ("thumbnail_size_w".into(), json!(self.thumbnail_size.width)),
            ("thumbnail_size_h".into(), json!(self.thumbnail_size.height)),
            ("medium_size_w".into(), json!(self.medium_size.width)),
            ("medium_size_h".into(), json!(self.medium_size.height)),
            ("large_size_w".into(), json!(self.large_size.width)),
            ("large_size_h".into(), json!(self.large_size.height)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_rejected() {
        let set = DesiredExtensionSet::new([
            ("seo-toolkit".to_string(), "SEO Toolkit".to_string()),
            ("seo-toolkit".to_string(), "SEO Toolkit Again".to_string()),
        ]);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let set = DesiredExtensionSet::new([(String::new(), "Nameless".to_string())]);
        assert!(set.validate().is_err());
    }

    #[test]
    fn test_declared_order_preserved() {
        let set = DesiredExtensionSet::new([
            ("b-ext".to_string(), "B".to_string()),
            ("a-ext".to_string(), "A".to_string()),
        ]);
        let ids: Vec<_> = set.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b-ext", "a-ext"]);
    }

    #[test]
    fn test_provisioning_defaults() {
        let prov = ProvisioningConfig::default();
        assert_eq!(prov.pages.len(), 4);
        assert_eq!(prov.pages[0].title, FRONT_PAGE_TITLE);

        let table = prov.settings_table();
        let comment = table
            .iter()
            .find(|(k, _)| k == "default_comment_status")
            .unwrap();
        assert_eq!(comment.1, serde_json::json!("closed"));
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn test_canonical_keys_default() {
        let fleet = FleetConfig::default();
        assert_eq!(fleet.primary_tenant, 1);
        assert!(fleet
            .canonical_keys
            .contains(&"timezone_string".to_string()));
        assert_eq!(fleet.admin_threshold_hours, 24);
    }
}
