// src/watch/watcher.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::snapshot::DirectorySnapshot;

use super::source::ChangeSource;

/// Path as the OS may report it (registered or canonical) -> path as registered.
type WatchedDirs = Arc<Mutex<HashMap<PathBuf, PathBuf>>>;

/// Change source backed by the platform's notification API (`notify`).
///
/// Directories are watched non-recursively. Any event that touches a watched
/// directory or one of its immediate children re-lists that directory; the
/// registry filters out listings that did not change.
pub struct NotifySource {
    inner: RecommendedWatcher,
    watched: WatchedDirs,
    forwarder: JoinHandle<()>,
}

impl std::fmt::Debug for NotifySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySource")
            .field("watched", &self.watched.lock().len())
            .finish_non_exhaustive()
    }
}

impl NotifySource {
    pub fn new(fs: Arc<dyn FileSystem>, runtime_tx: mpsc::Sender<RuntimeEvent>) -> Result<Self> {
        // Channel from the blocking notify callback into the async world.
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

        let inner = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(err) = event_tx.send(event) {
                        // No tracing context on the notify thread.
                        eprintln!("dirwatch: failed to forward notify event: {err}");
                    }
                }
                Err(err) => {
                    eprintln!("dirwatch: file watch error: {err}");
                }
            },
            Config::default(),
        )?;

        let watched: WatchedDirs = Arc::new(Mutex::new(HashMap::new()));
        let async_watched = Arc::clone(&watched);

        let forwarder = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                debug!(?event, "received notify event");

                for dir in affected_dirs(&event, &async_watched) {
                    let snapshot = match DirectorySnapshot::read(fs.as_ref(), &dir) {
                        Ok(s) => s,
                        Err(e) => {
                            warn!(dir = %dir.display(), error = %e, "re-listing directory failed");
                            continue;
                        }
                    };
                    if runtime_tx
                        .send(RuntimeEvent::SnapshotTaken { dir, snapshot })
                        .await
                        .is_err()
                    {
                        info!("runtime channel closed; stopping notify forwarder");
                        return;
                    }
                }
            }
            debug!("notify event loop finished");
        });

        Ok(Self {
            inner,
            watched,
            forwarder,
        })
    }
}

impl ChangeSource for NotifySource {
    fn watch(&mut self, dir: &Path) -> Result<()> {
        // inotify reports paths as registered; FSEvents reports them resolved
        // (e.g. /private/var on macOS). Either spelling maps back to `dir`.
        {
            let mut watched = self.watched.lock();
            watched.insert(dir.to_path_buf(), dir.to_path_buf());
            if let Ok(canonical) = dir.canonicalize() {
                watched.insert(canonical, dir.to_path_buf());
            }
        }

        self.inner.watch(dir, RecursiveMode::NonRecursive)?;

        info!(dir = %dir.display(), "notify watch started");
        Ok(())
    }
}

impl Drop for NotifySource {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}

/// Registered directories touched by `event`, each at most once.
fn affected_dirs(event: &Event, watched: &WatchedDirs) -> Vec<PathBuf> {
    let watched = watched.lock();
    let mut dirs: Vec<PathBuf> = Vec::new();

    for path in event.paths.iter() {
        let candidates = [Some(path.as_path()), path.parent()];
        for candidate in candidates.into_iter().flatten() {
            if let Some(registered) = watched.get(candidate) {
                if !dirs.contains(registered) {
                    dirs.push(registered.clone());
                }
            }
        }
    }

    dirs
}
