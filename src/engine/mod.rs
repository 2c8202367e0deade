// src/engine/mod.rs

//! Orchestration engine for dirwatch.
//!
//! This module ties together:
//! - the watch registry (snapshots and rules per directory)
//! - rule matching for change events (`dispatch`)
//! - the main runtime event loop that reacts to:
//!   - fresh directory listings from a change source
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;

use crate::watch::DirectorySnapshot;

/// Events flowing into the runtime from change sources and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A change source listed a watched directory.
    SnapshotTaken {
        dir: PathBuf,
        snapshot: DirectorySnapshot,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod dispatch;
pub mod event_handlers;
pub mod runtime;

pub use self::core::CoreRuntime;
pub use dispatch::{plan_dispatches, Dispatch};
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::Runtime;
