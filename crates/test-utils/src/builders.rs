#![allow(dead_code)]

use std::path::PathBuf;

use dirwatch::config::WatchRule;
use dirwatch::types::TriggerMask;
use dirwatch::watch::{ChangeEvent, DirectorySnapshot};

/// Builder for `WatchRule` to simplify test setup.
pub struct RuleBuilder {
    rule: WatchRule,
}

impl RuleBuilder {
    /// Rule on `dir` running `cmd`, firing on both creation and removal.
    pub fn new(dir: impl Into<PathBuf>, cmd: &str) -> Self {
        Self {
            rule: WatchRule {
                directory: dir.into(),
                triggers: TriggerMask::all(),
                command: cmd.to_string(),
            },
        }
    }

    pub fn created_only(mut self) -> Self {
        self.rule.triggers = TriggerMask::CREATED;
        self
    }

    pub fn removed_only(mut self) -> Self {
        self.rule.triggers = TriggerMask::REMOVED;
        self
    }

    pub fn triggers(mut self, mask: TriggerMask) -> Self {
        self.rule.triggers = mask;
        self
    }

    pub fn build(self) -> WatchRule {
        self.rule
    }
}

/// Snapshot from a list of names.
pub fn snapshot(names: &[&str]) -> DirectorySnapshot {
    names.iter().copied().collect()
}

/// Change event from created / removed name lists.
pub fn change(dir: impl Into<PathBuf>, created: &[&str], removed: &[&str]) -> ChangeEvent {
    ChangeEvent {
        directory: dir.into(),
        created: created.iter().map(|s| s.to_string()).collect(),
        removed: removed.iter().map(|s| s.to_string()).collect(),
    }
}
