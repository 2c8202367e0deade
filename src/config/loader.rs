// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawRuleSet, RuleSet};
use crate::config::parser::parse_rules;
use crate::errors::Result;
use crate::fs::FileSystem;

/// File name of the rule file in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".dirwatch";

/// Load a rule file and parse it into a `RawRuleSet`.
///
/// This only checks syntax; it does **not** look at the watch directories.
/// Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: &Path, home: &Path) -> Result<RawRuleSet> {
    let contents = fs.read_to_string(path)?;
    let raw = parse_rules(&contents, home)?;
    debug!(path = ?path, rules = raw.rules.len(), "parsed rule file");
    Ok(raw)
}

/// Load, parse and validate a rule file.
///
/// Returns `Ok(None)` when the file does not exist; the caller is expected
/// to show usage help in that case rather than treat it as an error.
pub fn load_and_validate(
    fs: &dyn FileSystem,
    path: &Path,
    home: &Path,
) -> Result<Option<RuleSet>> {
    if !fs.exists(path) {
        debug!(path = ?path, "rule file not found");
        return Ok(None);
    }
    let raw = load_from_path(fs, path, home)?;
    RuleSet::validate(raw, fs).map(Some)
}

/// Default rule file location: `~/.dirwatch`.
pub fn default_config_path(home: &Path) -> PathBuf {
    home.join(DEFAULT_CONFIG_FILE)
}
