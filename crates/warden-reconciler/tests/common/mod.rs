//! Shared test fixtures for reconciler tests

#![allow(dead_code)]

pub mod mocks;

use warden_core::config::DesiredExtensionSet;

/// Desired set from identifier list; display name derived from identifier
pub fn desired(ids: &[&str]) -> DesiredExtensionSet {
    DesiredExtensionSet::new(
        ids.iter()
            .map(|id| (id.to_string(), format!("{id} (display)"))),
    )
}
