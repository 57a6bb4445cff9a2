//! Tenant provisioning integration tests

use serde_json::json;
use warden_core::config::ProvisioningConfig;
use warden_core::types::TenantId;
use warden_fleet::{provision_tenant, TenantCreated};
use warden_platform::{MemoryPlatform, TenantDirectory, TenantStore};

fn created(id: u64) -> TenantCreated {
    TenantCreated {
        tenant: TenantId(id),
    }
}

#[test]
fn test_provisioning_completeness() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    let template = ProvisioningConfig::default();

    let report = provision_tenant(&platform, &platform, &created(2), &template).unwrap();

    // Exactly the 4 template pages were created.
    let items = platform.content_items(TenantId(2)).unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(report.pages_created.len(), 4);
    assert!(report.failed.is_empty());

    // The page titled "Home" is the front page, via two option writes.
    let home = items.iter().find(|i| i.title == "Home").unwrap();
    assert_eq!(report.front_page, Some(home.id));
    assert_eq!(
        platform.get_setting(TenantId(2), "page_on_front").unwrap(),
        Some(json!(home.id))
    );
    assert_eq!(
        platform.get_setting(TenantId(2), "show_on_front").unwrap(),
        Some(json!("page"))
    );
}

#[test]
fn test_options_table_applied_unconditionally() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    // Pre-existing value must be overwritten, not merged.
    platform
        .set_setting(TenantId(2), "timezone_string", json!("Europe/Berlin"))
        .unwrap();

    provision_tenant(&platform, &platform, &created(2), &ProvisioningConfig::default()).unwrap();

    assert_eq!(
        platform.get_setting(TenantId(2), "timezone_string").unwrap(),
        Some(json!("America/New_York"))
    );
    assert_eq!(
        platform
            .get_setting(TenantId(2), "default_comment_status")
            .unwrap(),
        Some(json!("closed"))
    );
    assert_eq!(
        platform.get_setting(TenantId(2), "thumbnail_size_w").unwrap(),
        Some(json!(300))
    );
}

#[test]
fn test_context_restored_after_provisioning() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    assert_eq!(platform.current_tenant(), TenantId(1));

    provision_tenant(&platform, &platform, &created(2), &ProvisioningConfig::default()).unwrap();

    assert_eq!(platform.current_tenant(), TenantId(1));
}

#[test]
fn test_context_restored_when_provisioning_fails() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    platform.fail_writes_for(TenantId(2));

    let result = provision_tenant(
        &platform,
        &platform,
        &created(2),
        &ProvisioningConfig::default(),
    );

    assert!(result.is_err());
    assert_eq!(platform.current_tenant(), TenantId(1));
}

#[test]
fn test_page_failure_does_not_stop_later_pages() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    platform.fail_content_titled("About");

    let report = provision_tenant(
        &platform,
        &platform,
        &created(2),
        &ProvisioningConfig::default(),
    )
    .unwrap();

    // "About" failed, but the remaining pages were still created and there
    // is no rollback of the ones before it.
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "About");
    let titles: Vec<_> = platform
        .content_items(TenantId(2))
        .unwrap()
        .into_iter()
        .map(|i| i.title)
        .collect();
    assert_eq!(titles, ["Home", "Contact", "Privacy Policy"]);
    assert!(report.front_page.is_some());
}

#[test]
fn test_provisioning_is_idempotent_for_settings() {
    let platform = MemoryPlatform::with_tenants([1, 2]);
    let template = ProvisioningConfig::default();

    provision_tenant(&platform, &platform, &created(2), &template).unwrap();
    let first = platform
        .get_setting(TenantId(2), "blogdescription")
        .unwrap();

    provision_tenant(&platform, &platform, &created(2), &template).unwrap();
    assert_eq!(
        platform.get_setting(TenantId(2), "blogdescription").unwrap(),
        first
    );
}
