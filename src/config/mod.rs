// src/config/mod.rs

//! Rule file loading and validation for dirwatch.
//!
//! Responsibilities:
//! - Define the rule data model (`model.rs`).
//! - Parse the line-oriented rule grammar (`parser.rs`).
//! - Load a rule file from disk (`loader.rs`).
//! - Check that every watched directory exists (`validate.rs`).

pub mod loader;
pub mod model;
pub mod parser;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, DEFAULT_CONFIG_FILE};
pub use model::{RawRuleSet, RuleSet, WatchRule};
pub use parser::{is_ignorable, parse_line, parse_rules, resolve_directory};
pub use validate::ensure_directory;
