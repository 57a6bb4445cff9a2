//! Extension reconciliation command

use crate::cli::ReconcileArgs;
use crate::output;
use crate::utils::{load_config, open_platform, registry_client};
use anyhow::Result;
use camino::Utf8Path;
use chrono::Duration;
use warden_fleet::LastRunMarker;
use warden_reconciler::{ExtensionReconciler, ReconcileReport};

/// Run one extension reconciliation pass
pub async fn run(args: ReconcileArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let platform = open_platform(&config)?;
    let registry = registry_client(&config, &platform)?;

    let marker = LastRunMarker::in_state_dir(&config.state_dir()?);
    if args.if_due {
        let threshold = Duration::hours(config.config.fleet.admin_threshold_hours);
        if !marker.should_run(threshold) {
            output::info("Last pass is recent; nothing to do (use without --if-due to force)");
            return Ok(());
        }
    }
    if let Err(e) = marker.touch() {
        tracing::warn!("Failed to write last-run marker: {e}");
    }

    let spinner = output::spinner("Reconciling extensions...");
    let reconciler =
        ExtensionReconciler::new(&platform, &registry, &config.config.extensions);
    let report = reconciler.reconcile().await;
    spinner.finish_and_clear();

    print_report(&report);
    Ok(())
}

/// Print a reconcile report
pub fn print_report(report: &ReconcileReport) {
    if report.is_converged() && !report.changed() {
        output::success("All desired extensions are installed and active");
        return;
    }

    for id in &report.installed {
        output::success(&format!("installed {id}"));
    }
    for id in &report.activated {
        output::success(&format!("activated {id}"));
    }
    for (id, reason) in &report.failed {
        output::error(&format!("{id}: {reason} (will retry on next trigger)"));
    }
    output::kv("unchanged", &report.unchanged.len().to_string());
}
