// src/watch/registry.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::WatchRule;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::snapshot::{ChangeEvent, DirectorySnapshot};
use crate::watch::source::ChangeSource;

/// Outcome of [`WatchRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First rule for this directory: snapshot taken and watch started.
    NewDirectory,
    /// Directory was already watched; the rule was appended.
    Appended,
}

/// Everything known about one watched directory. Rules keep registration
/// order.
#[derive(Debug, Clone)]
struct WatchEntry {
    snapshot: DirectorySnapshot,
    rules: Vec<WatchRule>,
}

/// Table of watched directories, keyed by absolute path.
///
/// Each directory appears once no matter how many rules name it, and owns
/// its last snapshot plus the rules registered against it.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    entries: BTreeMap<PathBuf, WatchEntry>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule.
    ///
    /// If the directory is new, it is listed now and `source` is asked to
    /// watch it. Otherwise the rule is appended and neither the snapshot nor
    /// the watch is touched.
    pub fn register(
        &mut self,
        rule: WatchRule,
        fs: &dyn FileSystem,
        source: &mut dyn ChangeSource,
    ) -> Result<Registration> {
        if let Some(entry) = self.entries.get_mut(&rule.directory) {
            debug!(
                dir = %rule.directory.display(),
                rules = entry.rules.len() + 1,
                "appending rule to already watched directory"
            );
            entry.rules.push(rule);
            return Ok(Registration::Appended);
        }

        let dir = rule.directory.clone();
        let snapshot = DirectorySnapshot::read(fs, &dir)?;
        source.watch(&dir)?;

        info!(
            dir = %dir.display(),
            entries = snapshot.len(),
            "watching directory"
        );

        self.entries.insert(
            dir,
            WatchEntry {
                snapshot,
                rules: vec![rule],
            },
        );
        Ok(Registration::NewDirectory)
    }

    /// Register every rule in order.
    pub fn register_all<I>(
        &mut self,
        rules: I,
        fs: &dyn FileSystem,
        source: &mut dyn ChangeSource,
    ) -> Result<()>
    where
        I: IntoIterator<Item = WatchRule>,
    {
        for rule in rules {
            info!(
                dir = %rule.directory.display(),
                trigger = %rule.triggers,
                command = %rule.command,
                "registering rule"
            );
            self.register(rule, fs, source)?;
        }
        Ok(())
    }

    /// Replace a directory's snapshot and report what changed.
    ///
    /// The snapshot is replaced even when the listing is identical. Unknown
    /// directories are ignored.
    pub fn apply_snapshot(
        &mut self,
        dir: &Path,
        snapshot: DirectorySnapshot,
    ) -> Option<ChangeEvent> {
        let Some(entry) = self.entries.get_mut(dir) else {
            debug!(dir = %dir.display(), "snapshot for unwatched directory ignored");
            return None;
        };
        let change = entry.snapshot.diff(&snapshot, dir);
        entry.snapshot = snapshot;
        change
    }

    pub fn rules_for(&self, dir: &Path) -> &[WatchRule] {
        self.entries
            .get(dir)
            .map(|e| e.rules.as_slice())
            .unwrap_or(&[])
    }

    pub fn snapshot_of(&self, dir: &Path) -> Option<&DirectorySnapshot> {
        self.entries.get(dir).map(|e| &e.snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
