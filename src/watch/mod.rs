// src/watch/mod.rs

//! Directory watching and change detection.
//!
//! This module is responsible for:
//! - Keeping one snapshot per watched directory (`registry`).
//! - Diffing listings into created/removed sets (`snapshot`).
//! - Feeding fresh listings into the runtime, either by stat polling
//!   (`poller`) or via the platform notification API (`watcher`).
//!
//! It does **not** run commands; it only turns directory changes into
//! [`ChangeEvent`]s.

pub mod poller;
pub mod registry;
pub mod snapshot;
pub mod source;
pub mod watcher;

pub use poller::{poll_directory, MtimeTracker, PollingSource, DEFAULT_POLL_INTERVAL};
pub use registry::{Registration, WatchRegistry};
pub use snapshot::{ChangeEvent, DirectorySnapshot};
pub use source::ChangeSource;
pub use watcher::NotifySource;
