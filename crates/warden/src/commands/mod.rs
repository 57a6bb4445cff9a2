//! CLI command implementations

pub mod config;
pub mod policy;
pub mod reconcile;
pub mod run;
pub mod status;
pub mod sync;
pub mod tenant;
pub mod version;
