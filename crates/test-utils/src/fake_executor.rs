use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use dirwatch::engine::Dispatch;
use dirwatch::errors::Result;
use dirwatch::exec::ExecutorBackend;

/// A fake executor that records every dispatch instead of spawning it.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<Dispatch>>>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<Dispatch>>>) -> Self {
        Self { executed }
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_dispatches(
        &mut self,
        dispatches: Vec<Dispatch>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            executed.lock().unwrap().extend(dispatches);
            Ok(())
        })
    }
}
