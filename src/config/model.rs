// src/config/model.rs

use std::path::PathBuf;

use crate::types::TriggerMask;

/// One parsed line of the rule file.
///
/// ```text
/// # triggers when files are created or removed in /etc
/// /etc notify-the-admin.sh
///
/// # creation only, directory relative to $HOME
/// + Pictures upload.sh
///
/// # removal only, quoted directory
/// - "My Todo" sync.sh
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRule {
    /// Absolute directory to watch. Relative paths in the rule file have
    /// already been resolved against the home directory.
    pub directory: PathBuf,

    /// Changes that fire this rule.
    pub triggers: TriggerMask,

    /// Command line, taken verbatim from the rule file. Split on whitespace
    /// when executed; there is no quoting.
    pub command: String,
}

/// Rules as read from the rule file, before the watch directories have been
/// checked against the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRuleSet {
    pub rules: Vec<WatchRule>,
}

/// Validated rule set: every rule's directory existed and was a directory
/// when the set was built.
///
/// Only constructible through [`RuleSet::validate`](crate::config::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<WatchRule>,
}

impl RuleSet {
    pub(crate) fn new_unchecked(rules: Vec<WatchRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[WatchRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn into_rules(self) -> Vec<WatchRule> {
        self.rules
    }
}
