//! # warden-fleet
//!
//! The fleet state synchronizer: provisions new tenants with the canonical
//! template, restricts extension-management capability grants, and keeps
//! canonical settings converged from the designated primary tenant to every
//! other tenant.
//!
//! All operations are idempotent and tolerate partial failure: one tenant's
//! write failure never blocks the rest of the fleet.

mod marker;
mod policy;
mod provision;
mod sync;
mod triggers;

pub use marker::LastRunMarker;
pub use policy::{evaluate, restrict_extension_grants, Decision};
pub use provision::{provision_tenant, ProvisionReport, TenantCreated};
pub use sync::{FleetSynchronizer, InitReport, SyncReport};
pub use triggers::{ReconcilePass, TriggerGateway};
