//! # warden-reconciler
//!
//! The extension reconciler: walks the desired extension set in declared
//! order and drives the platform toward it, installing absent packages
//! through the registry client and activating installed-but-inactive ones.
//!
//! The reconciler holds no state of its own; every pass re-derives the diff
//! from platform state, so repeated triggers are harmless. No identifier's
//! failure ever aborts the batch.

mod reconcile;

pub use reconcile::{ExtensionReconciler, Outcome, ReconcileReport};
