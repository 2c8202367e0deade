// src/exec/command.rs

use std::path::Path;

use crate::engine::Dispatch;
use crate::errors::{DirwatchError, Result};

/// Environment variable holding the changed directory.
pub const ENV_WATCH_DIR: &str = "WATCH_DIR";
/// Environment variable holding a JSON array of created entry names.
pub const ENV_WATCH_CREATED: &str = "WATCH_CREATED";
/// Environment variable holding a JSON array of removed entry names.
pub const ENV_WATCH_REMOVED: &str = "WATCH_REMOVED";

/// A ready-to-spawn process description.
///
/// `env` is applied to this child only; the parent's environment is never
/// modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn from_dispatch(dispatch: &Dispatch) -> Result<Self> {
        let (program, args) = split_command(&dispatch.command)?;
        let env = watch_env(&dispatch.directory, &dispatch.created, &dispatch.removed)?;
        Ok(Self { program, args, env })
    }

    /// Look up one of the environment values.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Split a command line on whitespace into program and arguments.
///
/// No quoting or escaping is recognised.
pub fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts
        .next()
        .ok_or_else(|| DirwatchError::InvalidCommand(command.to_string()))?;
    Ok((program, parts.collect()))
}

/// The `WATCH_*` variables for one dispatch.
pub fn watch_env(dir: &Path, created: &[String], removed: &[String]) -> Result<Vec<(String, String)>> {
    Ok(vec![
        (ENV_WATCH_DIR.to_string(), dir.to_string_lossy().into_owned()),
        (ENV_WATCH_CREATED.to_string(), serde_json::to_string(created)?),
        (ENV_WATCH_REMOVED.to_string(), serde_json::to_string(removed)?),
    ])
}
