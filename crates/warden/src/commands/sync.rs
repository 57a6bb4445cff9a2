//! Fleet sync command

use crate::cli::SyncArgs;
use crate::output;
use crate::utils::{load_config, open_platform};
use anyhow::Result;
use camino::Utf8Path;
use warden_core::types::TenantId;
use warden_fleet::FleetSynchronizer;

/// Sync canonical settings across the fleet
pub fn run(args: SyncArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;

    let sync = FleetSynchronizer::new(
        &platform,
        &platform,
        TenantId(config.config.fleet.primary_tenant),
        &config.config.fleet.canonical_keys,
    );

    if args.init {
        let init = sync.initialize_all_tenants()?;
        output::success(&format!(
            "Initialized {} tenants ({} open comment statuses closed)",
            init.initialized.len(),
            init.comments_closed
        ));
        for (tenant, reason) in &init.failed {
            output::warning(&format!("tenant {tenant}: {reason}"));
        }
    }

    let report = sync.sync_all_tenants()?;
    output::success(&format!(
        "Synced {} canonical keys to {} tenants",
        report.keys.len(),
        report.synced.len()
    ));
    for (tenant, reason) in &report.failed {
        output::warning(&format!(
            "tenant {tenant}: {reason} (will retry on next sync)"
        ));
    }
    Ok(())
}
