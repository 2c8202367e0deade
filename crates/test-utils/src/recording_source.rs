use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dirwatch::errors::Result;
use dirwatch::watch::ChangeSource;

/// A change source that only remembers which directories it was asked to
/// watch. Tests push snapshots into the runtime themselves.
#[derive(Debug, Default, Clone)]
pub struct RecordingSource {
    watched: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories passed to `watch`, in call order.
    pub fn watched(&self) -> Vec<PathBuf> {
        self.watched.lock().unwrap().clone()
    }
}

impl ChangeSource for RecordingSource {
    fn watch(&mut self, dir: &Path) -> Result<()> {
        self.watched.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}
