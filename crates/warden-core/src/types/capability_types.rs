//! Actor and capability type definitions

use serde::{Deserialize, Serialize};

/// Platform capabilities subject to policy evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Install new extensions on the platform
    InstallExtensions,
    /// Activate installed extensions
    ActivateExtensions,
    /// Update installed extensions
    UpdateExtensions,
    /// Delete installed extensions
    DeleteExtensions,
    /// Edit a tenant's settings
    ManageSettings,
    /// Create/edit tenant content
    ManageContent,
}

impl Capability {
    /// Whether this capability manages the platform extension set
    pub fn is_extension_management(self) -> bool {
        matches!(
            self,
            Capability::InstallExtensions
                | Capability::ActivateExtensions
                | Capability::UpdateExtensions
                | Capability::DeleteExtensions
        )
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Capability::InstallExtensions => "install_extensions",
            Capability::ActivateExtensions => "activate_extensions",
            Capability::UpdateExtensions => "update_extensions",
            Capability::DeleteExtensions => "delete_extensions",
            Capability::ManageSettings => "manage_settings",
            Capability::ManageContent => "manage_content",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install_extensions" => Ok(Capability::InstallExtensions),
            "activate_extensions" => Ok(Capability::ActivateExtensions),
            "update_extensions" => Ok(Capability::UpdateExtensions),
            "delete_extensions" => Ok(Capability::DeleteExtensions),
            "manage_settings" => Ok(Capability::ManageSettings),
            "manage_content" => Ok(Capability::ManageContent),
            other => Err(format!("unknown capability: {other}")),
        }
    }
}

/// Privilege role held by an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Network-wide administrator, the platform's highest privilege
    SuperAdmin,
    /// Administrator of a single tenant
    Admin,
    /// Regular tenant member
    Member,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" | "super-admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// An actor whose capability requests pass through policy evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Actor identifier
    pub id: u64,

    /// Privilege role
    pub role: Role,
}

impl Actor {
    /// Create an actor with the given role
    pub fn new(id: u64, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether the actor holds the platform's highest privilege
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// One grant in an actor's resolved capability set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grant {
    /// The capability resolves to this requirement
    Capability(Capability),
    /// Hard-deny marker; its presence denies the request outright
    DenyAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_extension_management_capabilities() {
        assert!(Capability::InstallExtensions.is_extension_management());
        assert!(Capability::DeleteExtensions.is_extension_management());
        assert!(!Capability::ManageContent.is_extension_management());
    }

    #[test]
    fn test_capability_parse_roundtrip() {
        for cap in [
            Capability::InstallExtensions,
            Capability::ActivateExtensions,
            Capability::UpdateExtensions,
            Capability::DeleteExtensions,
            Capability::ManageSettings,
            Capability::ManageContent,
        ] {
            assert_eq!(Capability::from_str(&cap.to_string()).unwrap(), cap);
        }
        assert!(Capability::from_str("fly").is_err());
    }

    #[test]
    fn test_super_admin_check() {
        assert!(Actor::new(1, Role::SuperAdmin).is_super_admin());
        assert!(!Actor::new(2, Role::Admin).is_super_admin());
    }
}
