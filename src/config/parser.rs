// src/config/parser.rs

//! Line-oriented rule grammar.
//!
//! ```text
//! [trigger] directory command
//! ```
//!
//! - `trigger`: zero or more of `+` (created) and `-` (removed). Empty means both.
//! - `directory`: a double-quoted string (may contain spaces) or a single token.
//!   A token that opens a quote without closing it is taken as-is.
//! - `command`: the rest of the line, verbatim.
//!
//! Blank lines and lines whose first non-space character is `#` are ignored.
//! There are no trailing comments.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::model::{RawRuleSet, WatchRule};
use crate::errors::{DirwatchError, Result};
use crate::types::TriggerMask;

/// Directory and command, after the trigger prefix has been stripped.
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"([^"]+)"|(\S+))\s+(.+)$"#).expect("rule regex is valid")
});

/// Whether a line is blank or a comment.
pub fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse one line of the rule file.
///
/// Returns `Ok(None)` for blank and comment lines. `line_no` is 1-based and
/// only used for error reporting.
pub fn parse_line(line_no: usize, line: &str, home: &Path) -> Result<Option<WatchRule>> {
    if is_ignorable(line) {
        return Ok(None);
    }

    let line = line.trim();
    let syntax_error = || DirwatchError::Syntax {
        line_no,
        line: line.to_string(),
    };

    // The trigger is the whole leading run of `+`/`-`, so an unquoted
    // directory can never start with one of them.
    let rest = line.trim_start_matches(['+', '-']);
    let trigger = &line[..line.len() - rest.len()];
    let triggers: TriggerMask = trigger.parse().map_err(|_| syntax_error())?;

    let caps = RULE_RE.captures(rest.trim_start()).ok_or_else(syntax_error)?;
    let dir = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .ok_or_else(syntax_error)?;
    let command = caps[3].to_string();

    Ok(Some(WatchRule {
        directory: resolve_directory(dir, home),
        triggers,
        command,
    }))
}

/// Parse a whole rule file. The first bad line aborts the parse.
pub fn parse_rules(contents: &str, home: &Path) -> Result<RawRuleSet> {
    let mut rules = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if let Some(rule) = parse_line(idx + 1, line, home)? {
            rules.push(rule);
        }
    }
    Ok(RawRuleSet { rules })
}

/// Resolve a directory from the rule file to an absolute path.
///
/// Absolute paths are kept; anything else is joined onto `home`. The result
/// is normalized lexically so that `Pictures`, `./Pictures/` and
/// `a/../Pictures` name the same registry entry.
pub fn resolve_directory(dir: &str, home: &Path) -> PathBuf {
    let dir = Path::new(dir);
    let joined = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        home.join(dir)
    };
    normalize_lexically(&joined)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root.
                if !matches!(out.components().next_back(), Some(Component::RootDir) | None) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
