// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an `ExecutorBackend` instead of spawning processes
//! itself. This makes it easy to swap in a fake executor in tests while
//! keeping the production spawning in [`task_runner`](super::task_runner).

use std::future::Future;
use std::pin::Pin;

use crate::engine::Dispatch;
use crate::errors::Result;

use super::task_runner::spawn_dispatch;

/// Trait abstracting how dispatches are executed.
///
/// Production code uses [`RealExecutorBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ExecutorBackend: Send {
    /// Start the given dispatches. Must not wait for them to finish.
    fn spawn_dispatches(
        &mut self,
        dispatches: Vec<Dispatch>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real executor backend used in production.
///
/// Every dispatch becomes its own OS process. Nothing is serialised:
/// commands from the same or different rules may run concurrently.
#[derive(Debug, Default)]
pub struct RealExecutorBackend;

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn spawn_dispatches(
        &mut self,
        dispatches: Vec<Dispatch>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            for dispatch in dispatches {
                spawn_dispatch(dispatch);
            }
            Ok(())
        })
    }
}
