// src/config/validate.rs

use std::path::Path;

use crate::config::model::{RawRuleSet, RuleSet};
use crate::errors::{DirwatchError, Result};
use crate::fs::FileSystem;

impl RuleSet {
    /// Check every rule's directory against the filesystem.
    ///
    /// All directories are checked before the set is returned, so a single
    /// bad rule rejects the whole file and nothing gets registered.
    pub fn validate(raw: RawRuleSet, fs: &dyn FileSystem) -> Result<RuleSet> {
        for rule in raw.rules.iter() {
            ensure_directory(fs, &rule.directory)?;
        }
        Ok(RuleSet::new_unchecked(raw.rules))
    }
}

/// Fail unless `dir` exists and is a directory.
pub fn ensure_directory(fs: &dyn FileSystem, dir: &Path) -> Result<()> {
    if !fs.exists(dir) {
        return Err(DirwatchError::MissingDirectory(dir.to_path_buf()));
    }
    if !fs.is_dir(dir) {
        return Err(DirwatchError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}
