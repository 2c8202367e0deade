// src/watch/source.rs

//! Pluggable change source abstraction.
//!
//! The registry asks a `ChangeSource` to start observing a directory exactly
//! once, the first time a rule names it. The source then pushes fresh
//! listings into the runtime as [`RuntimeEvent::SnapshotTaken`]; the
//! registry decides whether anything actually changed.
//!
//! - [`PollingSource`](super::poller::PollingSource) stats each directory on
//!   a fixed interval and only re-lists when the mtime advances.
//! - [`NotifySource`](super::watcher::NotifySource) re-lists whenever the
//!   platform reports an event for the directory.
//!
//! [`RuntimeEvent::SnapshotTaken`]: crate::engine::RuntimeEvent::SnapshotTaken

use std::path::Path;

use crate::errors::Result;

/// Something that can observe directories for changes.
pub trait ChangeSource: Send {
    /// Start observing `dir`. Called at most once per directory.
    fn watch(&mut self, dir: &Path) -> Result<()>;
}
