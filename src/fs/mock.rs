// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File {
        content: Vec<u8>,
        modified: SystemTime,
    },
    Dir {
        children: BTreeSet<String>,
        modified: SystemTime,
    },
}

impl MockEntry {
    fn modified(&self) -> SystemTime {
        match self {
            MockEntry::File { modified, .. } | MockEntry::Dir { modified, .. } => *modified,
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    /// Logical clock; every mutation advances it by one second.
    clock: u64,
}

impl MockState {
    fn tick(&mut self) -> SystemTime {
        self.clock += 1;
        UNIX_EPOCH + Duration::from_secs(self.clock)
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.entries.contains_key(path) {
            return;
        }
        let now = self.tick();
        self.entries.insert(
            path.to_path_buf(),
            MockEntry::Dir {
                children: BTreeSet::new(),
                modified: now,
            },
        );
        self.link_into_parent(path);
    }

    /// Add `path` to its parent's children and bump the parent's mtime.
    fn link_into_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        if parent.as_os_str().is_empty() {
            return;
        }
        self.ensure_dir(parent);
        let now = self.tick();
        if let Some(MockEntry::Dir { children, modified }) = self.entries.get_mut(parent) {
            children.insert(name.to_string_lossy().into_owned());
            *modified = now;
        }
    }

    fn unlink_from_parent(&mut self, path: &Path) {
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return;
        };
        let now = self.tick();
        if let Some(MockEntry::Dir { children, modified }) = self.entries.get_mut(parent) {
            children.remove(&*name.to_string_lossy());
            *modified = now;
        }
    }
}

/// In-memory filesystem for tests.
///
/// Directory mtimes follow a logical clock: creating or removing a child
/// advances the parent's mtime, and [`MockFileSystem::touch`] advances it
/// without touching the listing.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory (and any missing ancestors).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.state.lock().ensure_dir(path.as_ref());
    }

    /// Create or overwrite a file, creating missing ancestors.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.state.lock();
        let now = state.tick();
        let existed = state.entries.contains_key(path);
        state.entries.insert(
            path.to_path_buf(),
            MockEntry::File {
                content: content.into(),
                modified: now,
            },
        );
        if !existed {
            state.link_into_parent(path);
        }
    }

    /// Remove a file or an empty directory.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.state.lock();
        if state.entries.remove(path).is_some() {
            state.unlink_from_parent(path);
        }
    }

    /// Advance a directory's mtime without changing its listing
    /// (e.g. a permission change).
    pub fn touch(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.state.lock();
        let now = state.tick();
        if let Some(MockEntry::Dir { modified, .. } | MockEntry::File { modified, .. }) =
            state.entries.get_mut(path)
        {
            *modified = now;
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let state = self.state.lock();
        match state.entries.get(path) {
            Some(MockEntry::File { content, .. }) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir { .. }) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.state.lock().entries.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.state.lock().entries.get(path), Some(MockEntry::Dir { .. }))
    }

    fn modified(&self, path: &Path) -> Result<SystemTime> {
        self.state
            .lock()
            .entries
            .get(path)
            .map(MockEntry::modified)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        match self.state.lock().entries.get(path) {
            Some(MockEntry::Dir { children, .. }) => Ok(children.iter().cloned().collect()),
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
