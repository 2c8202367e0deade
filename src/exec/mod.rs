// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs the commands of matching rules with
//! `tokio::process::Command`.
//!
//! - [`command`] splits a rule's command line and builds the `WATCH_*`
//!   environment for one child.
//! - [`task_runner`] spawns a child without waiting for it and logs how it
//!   ended.
//! - [`backend`] provides the `ExecutorBackend` trait and the concrete
//!   `RealExecutorBackend` that the runtime uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{ExecutorBackend, RealExecutorBackend};
pub use command::{CommandSpec, ENV_WATCH_CREATED, ENV_WATCH_DIR, ENV_WATCH_REMOVED};
pub use task_runner::spawn_dispatch;
