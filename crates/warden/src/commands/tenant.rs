//! Tenant management commands

use crate::cli::{TenantCommands, TenantListArgs, TenantProvisionArgs};
use crate::output;
use crate::utils::{load_config, open_platform};
use anyhow::Result;
use camino::Utf8Path;
use tabled::{Table, Tabled};
use warden_core::types::{Tenant, TenantId};
use warden_fleet::{provision_tenant, FleetSynchronizer, TenantCreated};
use warden_platform::TenantDirectory;

/// Main entry point for tenant subcommands
pub fn run(cmd: TenantCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        TenantCommands::List(args) => list(args, config_path),
        TenantCommands::Provision(args) => provision(args, config_path),
    }
}

#[derive(Tabled)]
struct TenantRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// List all tenants
fn list(_args: TenantListArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;

    let tenants = platform.list_tenants()?;
    if tenants.is_empty() {
        output::info("No tenants registered");
        return Ok(());
    }

    let rows: Vec<TenantRow> = tenants
        .iter()
        .map(|t| TenantRow {
            id: t.id.0,
            domain: t.domain.clone(),
            path: t.path.clone(),
            created: t.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Create a tenant and apply the provisioning template
fn provision(args: TenantProvisionArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;

    let tenant = Tenant::new(TenantId(args.id), args.domain, args.path);
    platform.create_tenant(&tenant)?;

    let event = TenantCreated { tenant: tenant.id };
    let report = provision_tenant(&platform, &platform, &event, &config.config.provisioning)?;

    output::success(&format!(
        "Provisioned tenant {} with {} settings and {} pages",
        tenant.id,
        report.settings_applied,
        report.pages_created.len()
    ));
    for (title, reason) in &report.failed {
        output::warning(&format!("Page '{title}' was not created: {reason}"));
    }

    // Provisioning-adjacent initialization: force fleet-wide comment
    // defaults so the new tenant matches the rest of the fleet.
    let sync = FleetSynchronizer::new(
        &platform,
        &platform,
        TenantId(config.config.fleet.primary_tenant),
        &config.config.fleet.canonical_keys,
    );
    let init = sync.initialize_all_tenants()?;
    output::info(&format!(
        "Initialized {} tenants ({} open comment statuses closed)",
        init.initialized.len(),
        init.comments_closed
    ));
    Ok(())
}
