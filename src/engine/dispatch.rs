// src/engine/dispatch.rs

//! Matching change events against rules.

use std::path::PathBuf;

use crate::config::WatchRule;
use crate::watch::ChangeEvent;

/// One command to run in response to one change event.
///
/// `created` / `removed` always carry the full diff, whichever side made
/// the rule fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub directory: PathBuf,
    pub command: String,
    pub created: Vec<String>,
    pub removed: Vec<String>,
}

/// Rules that fire for `event`, in registration order, as dispatches.
///
/// Each rule is judged on its own; rules sharing a directory and a command
/// each produce a dispatch.
pub fn plan_dispatches(event: &ChangeEvent, rules: &[WatchRule]) -> Vec<Dispatch> {
    let any_created = !event.created.is_empty();
    let any_removed = !event.removed.is_empty();

    rules
        .iter()
        .filter(|rule| rule.triggers.fires_for(any_created, any_removed))
        .map(|rule| Dispatch {
            directory: event.directory.clone(),
            command: rule.command.clone(),
            created: event.created.iter().cloned().collect(),
            removed: event.removed.iter().cloned().collect(),
        })
        .collect()
}
