//! # warden-core
//!
//! Core library for the Warden CLI providing:
//! - Configuration file parsing (warden.yaml)
//! - The shared error taxonomy for reconciliation boundaries
//! - Type definitions for extensions, tenants, and capabilities

pub mod config;
pub mod error;
pub mod types;

pub use config::{DesiredExtensionSet, WardenConfig};
pub use error::{Error, Result};
