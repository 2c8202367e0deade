#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dirwatch::engine::{CoreRuntime, CoreStep, RuntimeEvent};
use dirwatch::fs::mock::MockFileSystem;
use dirwatch::watch::{poll_directory, MtimeTracker};

pub const HOME: &str = "/home/alice";

pub fn home() -> PathBuf {
    PathBuf::from(HOME)
}

/// Mock filesystem with the home directory and the given absolute
/// directories already present.
pub fn mock_fs_with_dirs(dirs: &[&str]) -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir(HOME);
    for dir in dirs {
        fs.add_dir(dir);
    }
    fs
}

/// One poll tick for `dir` fed straight into the core, the way the polling
/// source and runtime loop would do it.
pub fn tick(
    fs: &MockFileSystem,
    dir: &Path,
    tracker: &mut MtimeTracker,
    core: &mut CoreRuntime,
) -> CoreStep {
    match poll_directory(fs, dir, tracker).expect("poll tick failed") {
        Some(snapshot) => core.step(RuntimeEvent::SnapshotTaken {
            dir: dir.to_path_buf(),
            snapshot,
        }),
        None => CoreStep::idle(),
    }
}
