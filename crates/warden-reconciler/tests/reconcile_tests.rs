//! Reconciliation pass integration tests
//!
//! Covers the core reconciler guarantees:
//! - idempotence (second pass performs no installs/activations)
//! - per-identifier failure isolation (no failure aborts the batch)
//! - activation of installed-but-inactive extensions

mod common;

use common::mocks::MockRegistry;
use common::desired;
use warden_core::types::InstalledExtension;
use warden_platform::MemoryPlatform;
use warden_reconciler::ExtensionReconciler;

#[tokio::test]
async fn test_installs_and_activates_missing_extensions() {
    let platform = MemoryPlatform::new();
    let registry = MockRegistry::new()
        .with_package("seo-toolkit")
        .with_package("firewall");
    let desired = desired(&["seo-toolkit", "firewall"]);

    let reconciler = ExtensionReconciler::new(&platform, &registry, &desired);
    let report = reconciler.reconcile().await;

    assert_eq!(report.installed, ["seo-toolkit", "firewall"]);
    assert!(report.failed.is_empty());
    assert_eq!(platform.register_count(), 2);
    assert_eq!(platform.activate_count(), 2);
}

#[tokio::test]
async fn test_second_pass_is_idempotent() {
    let platform = MemoryPlatform::new();
    let registry = MockRegistry::new().with_package("seo-toolkit");
    let desired = desired(&["seo-toolkit"]);

    let reconciler = ExtensionReconciler::new(&platform, &registry, &desired);
    let first = reconciler.reconcile().await;
    assert!(first.changed());

    let second = reconciler.reconcile().await;
    assert!(!second.changed());
    assert_eq!(second.unchanged, ["seo-toolkit"]);

    // No additional install or activate calls on the second pass.
    assert_eq!(registry.install_calls().len(), 1);
    assert_eq!(platform.register_count(), 1);
    assert_eq!(platform.activate_count(), 1);
}

#[tokio::test]
async fn test_not_found_does_not_abort_batch() {
    let platform = MemoryPlatform::new();
    // "ghost" is absent from the registry; the two real packages must still
    // be attempted.
    let registry = MockRegistry::new()
        .with_package("seo-toolkit")
        .with_package("firewall");
    let desired = desired(&["seo-toolkit", "ghost", "firewall"]);

    let reconciler = ExtensionReconciler::new(&platform, &registry, &desired);
    let report = reconciler.reconcile().await;

    assert_eq!(report.installed, ["seo-toolkit", "firewall"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "ghost");
    assert_eq!(
        registry.resolve_calls(),
        ["seo-toolkit", "ghost", "firewall"]
    );
}

#[tokio::test]
async fn test_transport_failure_is_isolated() {
    let platform = MemoryPlatform::new();
    let registry = MockRegistry::new()
        .with_lookup_error("flaky")
        .with_package("firewall");
    let desired = desired(&["flaky", "firewall"]);

    let report = ExtensionReconciler::new(&platform, &registry, &desired)
        .reconcile()
        .await;

    assert_eq!(report.installed, ["firewall"]);
    assert_eq!(report.failed[0].0, "flaky");
}

#[tokio::test]
async fn test_install_failure_is_isolated() {
    let platform = MemoryPlatform::new();
    let registry = MockRegistry::new()
        .with_install_error("broken")
        .with_package("firewall");
    let desired = desired(&["broken", "firewall"]);

    let report = ExtensionReconciler::new(&platform, &registry, &desired)
        .reconcile()
        .await;

    assert_eq!(report.installed, ["firewall"]);
    assert_eq!(report.failed[0].0, "broken");
    // Nothing was registered for the broken package.
    assert_eq!(platform.register_count(), 1);
}

#[tokio::test]
async fn test_activates_installed_but_inactive() {
    let platform = MemoryPlatform::new();
    platform.add_extension(InstalledExtension::new("seo-toolkit", "pkg-1.0"));
    let registry = MockRegistry::new();
    let desired = desired(&["seo-toolkit"]);

    let report = ExtensionReconciler::new(&platform, &registry, &desired)
        .reconcile()
        .await;

    assert_eq!(report.activated, ["seo-toolkit"]);
    // Installed already: the registry is never consulted.
    assert!(registry.resolve_calls().is_empty());
}

#[tokio::test]
async fn test_desired_order_is_respected() {
    let platform = MemoryPlatform::new();
    let registry = MockRegistry::new()
        .with_package("zeta")
        .with_package("alpha");
    let desired = desired(&["zeta", "alpha"]);

    ExtensionReconciler::new(&platform, &registry, &desired)
        .reconcile()
        .await;

    assert_eq!(registry.install_calls(), ["zeta", "alpha"]);
}
