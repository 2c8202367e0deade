// src/watch/snapshot.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::fs::FileSystem;

/// Names of a directory's immediate children at one point in time.
///
/// Snapshots are only ever replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    entries: BTreeSet<String>,
}

impl DirectorySnapshot {
    /// List `dir` now.
    pub fn read(fs: &dyn FileSystem, dir: &Path) -> Result<Self> {
        Ok(fs.list_dir(dir)?.into_iter().collect())
    }

    pub fn entries(&self) -> &BTreeSet<String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compare `self` (old) against `newer`.
    ///
    /// Returns `None` when the listings are identical.
    pub fn diff(&self, newer: &DirectorySnapshot, dir: &Path) -> Option<ChangeEvent> {
        let created: BTreeSet<String> = newer.entries.difference(&self.entries).cloned().collect();
        let removed: BTreeSet<String> = self.entries.difference(&newer.entries).cloned().collect();

        if created.is_empty() && removed.is_empty() {
            return None;
        }

        Some(ChangeEvent {
            directory: dir.to_path_buf(),
            created,
            removed,
        })
    }
}

impl FromIterator<String> for DirectorySnapshot {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for DirectorySnapshot {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

/// A confirmed change to one directory's listing.
///
/// `created` and `removed` are disjoint and at least one is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub directory: PathBuf,
    pub created: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}
