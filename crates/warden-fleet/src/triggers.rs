//! Trigger gateway
//!
//! Three trigger kinds reach the reconciliation core: fire-once activation,
//! the recurring daily tick, and the frequent admin-context event which is
//! self-rate-limited against the last-run marker. Every trigger drives the
//! same idempotent pass, so duplicate or overlapping deliveries are
//! harmless.

use crate::marker::LastRunMarker;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use warden_core::Result;

/// One full reconciliation pass (extensions + fleet sync)
#[async_trait]
pub trait ReconcilePass: Send + Sync {
    async fn run_pass(&self) -> Result<()>;
}

/// Delivers activation / recurring / admin-context triggers to the core
pub struct TriggerGateway<P> {
    pass: P,
    marker: LastRunMarker,
    threshold: Duration,
    recurring_scheduled: AtomicBool,
}

impl<P: ReconcilePass> TriggerGateway<P> {
    /// Create a gateway with the given admin-trigger threshold
    pub fn new(pass: P, marker: LastRunMarker, threshold_hours: i64) -> Self {
        Self {
            pass,
            marker,
            threshold: Duration::hours(threshold_hours),
            recurring_scheduled: AtomicBool::new(false),
        }
    }

    /// Fire-once activation trigger
    pub async fn on_activate(&self) -> Result<()> {
        self.run("activation").await
    }

    /// Recurring timer tick
    ///
    /// Failures never propagate to the scheduler; the next tick re-derives
    /// state from scratch.
    pub async fn on_recurring_tick(&self) {
        if let Err(e) = self.run("recurring-tick").await {
            warn!("Recurring reconciliation pass failed: {e}");
        }
    }

    /// Frequent admin-context trigger, rate-limited by the last-run marker
    ///
    /// Returns whether a pass actually ran.
    pub async fn on_admin_context(&self) -> Result<bool> {
        if !self.marker.should_run(self.threshold) {
            debug!("Admin-context trigger suppressed by last-run marker");
            return Ok(false);
        }
        self.run("admin-context").await?;
        Ok(true)
    }

    /// Claim the recurring schedule slot
    ///
    /// Returns true exactly once; callers must check this before
    /// registering a recurring timer so at most one recurrence exists.
    pub fn try_schedule_recurring(&self) -> bool {
        !self.recurring_scheduled.swap(true, Ordering::SeqCst)
    }

    async fn run(&self, trigger: &str) -> Result<()> {
        // Written at pass start: an overlapping trigger sees the fresh
        // timestamp, and a lost update allows at most one extra idempotent
        // pass.
        if let Err(e) = self.marker.touch() {
            warn!("Failed to write last-run marker: {e}");
        }
        info!("Reconciliation pass triggered ({trigger})");
        self.pass.run_pass().await
    }
}
