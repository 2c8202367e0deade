// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::path::Path;

use tracing::{debug, info};

use crate::engine::dispatch::{plan_dispatches, Dispatch};
use crate::watch::{DirectorySnapshot, WatchRegistry};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Hand these dispatches to the executor.
    Dispatch(Vec<Dispatch>),
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    /// All dispatches across this step's commands.
    pub fn dispatches(&self) -> impl Iterator<Item = &Dispatch> {
        self.commands.iter().flat_map(|c| match c {
            CoreCommand::Dispatch(d) => d.iter(),
        })
    }
}

/// Handle a fresh listing for a watched directory.
///
/// 1. Swap the listing into the registry and diff it against the old one.
/// 2. Identical listings (e.g. an mtime bump from a chmod) end here.
/// 3. Otherwise every rule of the directory is checked and the ones that
///    fire become dispatches.
pub fn handle_snapshot(
    registry: &mut WatchRegistry,
    dir: &Path,
    snapshot: DirectorySnapshot,
) -> CoreStep {
    let Some(change) = registry.apply_snapshot(dir, snapshot) else {
        debug!(dir = %dir.display(), "listing unchanged");
        return CoreStep::idle();
    };

    info!(
        dir = %dir.display(),
        created = ?change.created,
        removed = ?change.removed,
        "directory changed"
    );

    let dispatches = plan_dispatches(&change, registry.rules_for(dir));
    if dispatches.is_empty() {
        debug!(dir = %dir.display(), "no rule matched this change");
        return CoreStep::idle();
    }

    CoreStep {
        commands: vec![CoreCommand::Dispatch(dispatches)],
        keep_running: true,
    }
}
