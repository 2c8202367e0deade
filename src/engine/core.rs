// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces:
//! - an updated registry (new snapshots)
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - handing dispatches to the executor
//! - handling Ctrl+C / shutdown
//!
//! The core is intended to be tested without any Tokio, channels,
//! filesystem, or processes.

use crate::engine::event_handlers::{handle_snapshot, CoreStep};
use crate::engine::RuntimeEvent;
use crate::watch::WatchRegistry;

/// Pure core runtime state.
///
/// Owns the watch registry. It has **no** channels, no Tokio types, and does
/// not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    registry: WatchRegistry,
}

impl CoreRuntime {
    pub fn new(registry: WatchRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &WatchRegistry {
        &self.registry
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::SnapshotTaken { dir, snapshot } => {
                handle_snapshot(&mut self.registry, &dir, snapshot)
            }
            RuntimeEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
