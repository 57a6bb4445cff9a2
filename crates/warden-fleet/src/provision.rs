//! New-tenant provisioning

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use warden_core::config::{ProvisioningConfig, FRONT_PAGE_TITLE};
use warden_core::types::{NewContentItem, TenantId};
use warden_core::Result;
use warden_platform::{with_tenant_context, TenantDirectory, TenantStore};

/// Tenant-creation lifecycle event
#[derive(Debug, Clone)]
pub struct TenantCreated {
    /// Id of the newly created tenant
    pub tenant: TenantId,
}

/// Result of provisioning one tenant
#[derive(Debug, Default, Serialize)]
pub struct ProvisionReport {
    /// Number of settings applied from the template table
    pub settings_applied: usize,

    /// (title, id) of each created page, in creation order
    pub pages_created: Vec<(String, u64)>,

    /// Id of the page promoted to front page
    pub front_page: Option<u64>,

    /// Pages that failed to create (title, reason); later pages were still
    /// attempted; there is no rollback of already-created pages
    pub failed: Vec<(String, String)>,
}

/// Provision a freshly created tenant with the canonical template
///
/// Runs inside the tenant's scoped context; the prior ambient tenant is
/// restored on every exit path. The options table is applied
/// unconditionally (last-write-wins), then the template pages are created
/// in order; the page titled "Home" is additionally marked as the tenant's
/// front page via two option writes.
pub fn provision_tenant(
    directory: &dyn TenantDirectory,
    store: &dyn TenantStore,
    event: &TenantCreated,
    template: &ProvisioningConfig,
) -> Result<ProvisionReport> {
    info!("Provisioning tenant {}", event.tenant);

    with_tenant_context(directory, event.tenant, |tenant| {
        let mut report = ProvisionReport::default();

        let table = template.settings_table();
        store.apply_settings(tenant, &table)?;
        report.settings_applied = table.len();

        for page in &template.pages {
            match store.create_content(tenant, NewContentItem::page(&page.title, &page.body)) {
                Ok(id) => {
                    report.pages_created.push((page.title.clone(), id));
                    if page.title == FRONT_PAGE_TITLE {
                        store.set_setting(tenant, "page_on_front", json!(id))?;
                        store.set_setting(tenant, "show_on_front", json!("page"))?;
                        report.front_page = Some(id);
                    }
                }
                Err(e) => {
                    warn!(
                        "Failed to create page '{}' on tenant {tenant}: {e}",
                        page.title
                    );
                    report.failed.push((page.title.clone(), e.to_string()));
                }
            }
        }

        info!(
            "Provisioned tenant {tenant}: {} settings, {} pages, front page {:?}",
            report.settings_applied,
            report.pages_created.len(),
            report.front_page
        );
        Ok(report)
    })
}
