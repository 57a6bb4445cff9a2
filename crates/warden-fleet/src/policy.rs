//! Capability policy evaluation
//!
//! Extension management (install/activate/update/delete) is reserved for
//! super admins. This is an explicit policy function composed into the
//! platform's authorization pipeline; it mutates nothing and performs no
//! I/O.

use warden_core::types::{Actor, Capability, Grant};

/// Outcome of evaluating one capability request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

/// Evaluate whether the actor may exercise the capability
///
/// Pure function of (capability, actor privilege).
pub fn evaluate(actor: &Actor, capability: Capability) -> Decision {
    if capability.is_extension_management() && !actor.is_super_admin() {
        Decision::Deny
    } else {
        Decision::Allow
    }
}

/// Filter an actor's resolved grant set for one requested capability
///
/// Grants pass through unchanged when the policy allows the request;
/// otherwise a hard-deny marker is appended to the set. Non-extension
/// capabilities always pass through.
pub fn restrict_extension_grants(
    capability: Capability,
    actor: &Actor,
    mut grants: Vec<Grant>,
) -> Vec<Grant> {
    if evaluate(actor, capability) == Decision::Deny {
        grants.push(Grant::DenyAll);
    }
    grants
}
