//! Extension type definitions

use serde::{Deserialize, Serialize};

/// One entry of the desired extension set (static configuration)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredExtension {
    /// Extension identifier (lowercase, hyphens allowed)
    pub id: String,

    /// Human-readable display name
    pub name: String,
}

/// An extension installed on the platform
///
/// Owned by the platform's extension subsystem; the reconciler only reads
/// these records and requests mutation through the platform API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledExtension {
    /// Extension identifier. Matching against the desired set is by exact
    /// identifier equality, never by storage-path prefix.
    pub identifier: String,

    /// Storage path or opaque handle assigned at install time
    pub handle: String,

    /// Whether the extension is currently activated
    #[serde(default)]
    pub active: bool,
}

impl InstalledExtension {
    /// Create an inactive installed record
    pub fn new(identifier: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            handle: handle.into(),
            active: false,
        }
    }
}
