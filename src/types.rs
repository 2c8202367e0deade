use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use clap::ValueEnum;

bitflags! {
    /// Which kinds of directory change a rule reacts to.
    ///
    /// `+` in a rule line selects `CREATED`, `-` selects `REMOVED`. A rule
    /// without a trigger prefix selects both.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TriggerMask: u8 {
        const CREATED = 0b01;
        const REMOVED = 0b10;
    }
}

impl TriggerMask {
    /// Decide whether a change with the given non-empty sides fires this mask.
    pub fn fires_for(self, any_created: bool, any_removed: bool) -> bool {
        (any_created && self.contains(TriggerMask::CREATED))
            || (any_removed && self.contains(TriggerMask::REMOVED))
    }
}

impl Default for TriggerMask {
    fn default() -> Self {
        TriggerMask::all()
    }
}

impl FromStr for TriggerMask {
    type Err = String;

    /// Parse a run of `+` / `-` characters. The empty string selects both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(TriggerMask::default());
        }

        let mut mask = TriggerMask::empty();
        for c in s.chars() {
            match c {
                '+' => mask |= TriggerMask::CREATED,
                '-' => mask |= TriggerMask::REMOVED,
                other => return Err(format!("invalid trigger character {other:?}")),
            }
        }
        Ok(mask)
    }
}

impl fmt::Display for TriggerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(TriggerMask::CREATED) {
            f.write_str("+")?;
        }
        if self.contains(TriggerMask::REMOVED) {
            f.write_str("-")?;
        }
        Ok(())
    }
}

/// Which change source backs the directory watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceKind {
    /// Periodically stat each directory and re-list it when its mtime advances.
    #[default]
    Poll,
    /// Use the platform's filesystem notification API via `notify`.
    Notify,
}
