//! Trigger scheduler command
//!
//! Hosts the long-running scheduler: an activation pass at startup, then a
//! recurring tick driving the trigger gateway. The recurrence slot is
//! claimed through the gateway so a second registration attempt is a no-op.

use crate::cli::RunArgs;
use crate::output;
use crate::utils::{load_config, open_platform, registry_client};
use anyhow::Result;
use async_trait::async_trait;
use camino::Utf8Path;
use std::time::Duration;
use tracing::{info, warn};
use warden_core::config::WardenConfigFile;
use warden_core::types::TenantId;
use warden_fleet::{FleetSynchronizer, LastRunMarker, ReconcilePass, TriggerGateway};
use warden_platform::FsPlatform;
use warden_reconciler::ExtensionReconciler;
use warden_registry::HttpRegistryClient;

/// Full reconciliation pass: extension convergence followed by fleet sync
///
/// Per-identifier and per-tenant failures stay inside the reports; only
/// infrastructure failures (unreadable platform state) surface from here.
pub struct ConvergeDriver {
    config: WardenConfigFile,
    platform: FsPlatform,
    registry: HttpRegistryClient,
}

#[async_trait]
impl ReconcilePass for ConvergeDriver {
    async fn run_pass(&self) -> warden_core::Result<()> {
        let reconciler =
            ExtensionReconciler::new(&self.platform, &self.registry, &self.config.extensions);
        let report = reconciler.reconcile().await;
        if !report.is_converged() {
            warn!(
                "{} extensions not converged; next trigger will retry",
                report.failed.len()
            );
        }

        let sync = FleetSynchronizer::new(
            &self.platform,
            &self.platform,
            TenantId(self.config.fleet.primary_tenant),
            &self.config.fleet.canonical_keys,
        );
        match sync.sync_all_tenants() {
            Ok(sync_report) => info!(
                "Fleet sync: {} tenants updated, {} failed",
                sync_report.synced.len(),
                sync_report.failed.len()
            ),
            Err(e) => warn!("Fleet sync skipped this pass: {e}"),
        }
        Ok(())
    }
}

/// Run the trigger scheduler
pub async fn run(args: RunArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;
    let registry = registry_client(&config, &platform)?;
    let state_dir = config.state_dir()?;

    let driver = ConvergeDriver {
        config: config.config.clone(),
        platform,
        registry,
    };
    let gateway = TriggerGateway::new(
        driver,
        LastRunMarker::in_state_dir(&state_dir),
        config.config.fleet.admin_threshold_hours,
    );

    output::info("Running activation pass");
    gateway.on_activate().await?;
    if args.once {
        output::success("Pass complete");
        return Ok(());
    }

    // Check-before-schedule: at most one recurring registration.
    if gateway.try_schedule_recurring() {
        let period = Duration::from_secs(args.interval_hours * 3600);
        output::info(&format!(
            "Scheduling recurring pass every {} hours",
            args.interval_hours
        ));
        let mut interval = tokio::time::interval(period);
        // The first tick fires immediately; the activation pass covered it.
        interval.tick().await;
        loop {
            interval.tick().await;
            gateway.on_recurring_tick().await;
        }
    }
    Ok(())
}
