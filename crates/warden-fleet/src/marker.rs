//! Last-run marker for rate-limited triggers
//!
//! A single persisted timestamp at `<state>/last_run.json`. The marker is
//! written immediately after a pass starts, not after it completes, so an
//! overlapping trigger sees the newer timestamp as early as possible. The
//! write is a single overwrite: last write wins, and a lost update costs at
//! most one extra idempotent pass.

use chrono::{DateTime, Duration, Utc};
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use warden_core::Result;

/// Marker file name under the state directory
const MARKER_FILE: &str = "last_run.json";

#[derive(Debug, Serialize, Deserialize)]
struct MarkerFile {
    last_run: DateTime<Utc>,
}

/// Persisted last-run timestamp
pub struct LastRunMarker {
    path: PathBuf,
}

impl LastRunMarker {
    /// Marker at an explicit path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Marker at the conventional location under a state directory
    pub fn in_state_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(MARKER_FILE))
    }

    /// Timestamp of the last recorded run start
    ///
    /// A missing or unreadable marker reads as "never ran".
    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<MarkerFile>(&content) {
            Ok(marker) => Some(marker.last_run),
            Err(e) => {
                warn!("Ignoring corrupt last-run marker at {:?}: {e}", self.path);
                None
            }
        }
    }

    /// Whether enough time has elapsed since the last run
    pub fn should_run(&self, threshold: Duration) -> bool {
        match self.last_run() {
            Some(last) => Utc::now() - last > threshold,
            None => true,
        }
    }

    /// Record that a run is starting now
    pub fn touch(&self) -> Result<()> {
        self.record_run_at(Utc::now())
    }

    /// Record a run start at an explicit instant
    pub fn record_run_at(&self, at: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        // Exclusive lock, released on drop. Concurrent writers serialize;
        // whichever writes last wins.
        file.lock_exclusive()?;
        let json = serde_json::to_string(&MarkerFile { last_run: at })?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        debug!("Recorded run start {at} at {:?}", self.path);
        Ok(())
    }
}
