// src/watch/poller.rs

//! Stat-polling change source.
//!
//! Every watched directory gets its own Tokio task ticking on a fixed
//! interval. A tick stats the directory and, only when the mtime is strictly
//! newer than the last one seen, re-lists it and hands the listing to the
//! runtime. Ticks for one directory never overlap.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};

use crate::engine::RuntimeEvent;
use crate::fs::FileSystem;
use crate::watch::snapshot::DirectorySnapshot;
use crate::watch::source::ChangeSource;

/// Default interval between two stats of the same directory.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Last observed modification time of one directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtimeTracker {
    last: Option<SystemTime>,
}

impl MtimeTracker {
    pub fn new(initial: Option<SystemTime>) -> Self {
        Self { last: initial }
    }

    pub fn last(&self) -> Option<SystemTime> {
        self.last
    }

    /// Strictly newer than the last observation. With no baseline nothing
    /// counts as newer.
    pub fn is_newer(&self, current: SystemTime) -> bool {
        matches!(self.last, Some(prev) if current > prev)
    }

    pub fn record(&mut self, current: SystemTime) {
        self.last = Some(current);
    }
}

/// One poll tick.
///
/// Returns the fresh listing when the mtime advanced, `None` otherwise. The
/// tracker is only advanced past a newer mtime once the listing succeeded,
/// so a failed listing is retried on the next tick.
pub fn poll_directory(
    fs: &dyn FileSystem,
    dir: &Path,
    tracker: &mut MtimeTracker,
) -> Result<Option<DirectorySnapshot>> {
    let current = fs.modified(dir)?;

    if !tracker.is_newer(current) {
        tracker.record(current);
        return Ok(None);
    }

    let snapshot = DirectorySnapshot::read(fs, dir)?;
    tracker.record(current);
    Ok(Some(snapshot))
}

/// Change source that stats each directory on a fixed interval.
///
/// Dropping the source stops every poll task it started.
#[derive(Debug)]
pub struct PollingSource {
    fs: Arc<dyn FileSystem>,
    interval: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollingSource {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        interval: Duration,
        runtime_tx: mpsc::Sender<RuntimeEvent>,
    ) -> Self {
        Self {
            fs,
            interval,
            runtime_tx,
            tasks: Vec::new(),
        }
    }

    /// Number of directories being polled.
    pub fn watch_count(&self) -> usize {
        self.tasks.len()
    }
}

impl ChangeSource for PollingSource {
    fn watch(&mut self, dir: &Path) -> crate::errors::Result<()> {
        // Baseline taken now so changes between registration and the first
        // tick are still seen.
        let baseline = match self.fs.modified(dir) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "could not read initial mtime");
                None
            }
        };

        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.fs),
            dir.to_path_buf(),
            MtimeTracker::new(baseline),
            self.interval,
            self.runtime_tx.clone(),
        ));
        self.tasks.push(handle);

        debug!(dir = %dir.display(), interval = ?self.interval, "poll task started");
        Ok(())
    }
}

impl Drop for PollingSource {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

async fn poll_loop(
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
    mut tracker: MtimeTracker,
    interval: Duration,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the baseline already covers it.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match poll_directory(fs.as_ref(), &dir, &mut tracker) {
            Ok(None) => trace!(dir = %dir.display(), "mtime unchanged"),
            Ok(Some(snapshot)) => {
                debug!(
                    dir = %dir.display(),
                    entries = snapshot.len(),
                    "mtime advanced; directory re-listed"
                );
                let event = RuntimeEvent::SnapshotTaken {
                    dir: dir.clone(),
                    snapshot,
                };
                if runtime_tx.send(event).await.is_err() {
                    info!(dir = %dir.display(), "runtime channel closed; stopping poll task");
                    break;
                }
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "poll tick failed");
            }
        }
    }
}
