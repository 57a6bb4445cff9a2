//! # warden-registry
//!
//! Registry client for the Warden reconciler. Resolves an extension
//! identifier to a downloadable package descriptor and installs package
//! artifacts into the platform package directory.
//!
//! Expected "not found" is reported as [`Resolution::NotFound`], never as an
//! error; transport failures and malformed metadata surface as
//! `Error::RegistryLookup` / `Error::Install` and are handled per-identifier
//! by the caller.

mod client;
mod http;

pub use client::{InstalledHandle, PackageDescriptor, RegistryClient, Resolution};
pub use http::HttpRegistryClient;
