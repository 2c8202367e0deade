// tests/runtime_fake_executor.rs

mod common;
use crate::common::mock_fs_with_dirs;

use dirwatch_test_utils::builders::{snapshot, RuleBuilder};
use dirwatch_test_utils::fake_executor::FakeExecutor;
use dirwatch_test_utils::init_tracing;
use dirwatch_test_utils::recording_source::RecordingSource;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use dirwatch::engine::{CoreRuntime, Runtime, RuntimeEvent};
use dirwatch::watch::WatchRegistry;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn runtime_with_fake_executor_dispatches_matching_rules() -> TestResult {
    init_tracing();

    let fs = mock_fs_with_dirs(&["/in", "/out"]);
    fs.add_file("/in/existing", "");

    let mut source = RecordingSource::new();
    let mut registry = WatchRegistry::new();
    registry.register_all(
        vec![
            RuleBuilder::new("/in", "on-create.sh").created_only().build(),
            RuleBuilder::new("/in", "on-remove.sh").removed_only().build(),
            RuleBuilder::new("/out", "other.sh").build(),
        ],
        &fs,
        &mut source,
    )?;

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(16);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(executed.clone());

    // A file appears in /in, then /in is listed again unchanged, then
    // /out gets an mtime bump with no listing change.
    for event in [
        RuntimeEvent::SnapshotTaken {
            dir: PathBuf::from("/in"),
            snapshot: snapshot(&["existing", "new"]),
        },
        RuntimeEvent::SnapshotTaken {
            dir: PathBuf::from("/in"),
            snapshot: snapshot(&["existing", "new"]),
        },
        RuntimeEvent::SnapshotTaken {
            dir: PathBuf::from("/out"),
            snapshot: snapshot(&[]),
        },
        RuntimeEvent::ShutdownRequested,
    ] {
        rt_tx.send(event).await?;
    }

    let runtime = Runtime::new(CoreRuntime::new(registry), rt_rx, executor);

    // Enforce an upper bound on how long this test may run.
    let core = match timeout(Duration::from_secs(3), runtime.run()).await {
        Ok(Ok(core)) => core,
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => panic!("runtime did not finish within 3 seconds"),
    };

    let dispatched = executed.lock().unwrap().clone();
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].command, "on-create.sh");
    assert_eq!(dispatched[0].directory, PathBuf::from("/in"));
    assert_eq!(dispatched[0].created, vec!["new".to_string()]);
    assert!(dispatched[0].removed.is_empty());

    assert_eq!(
        core.registry().snapshot_of(Path::new("/in")),
        Some(&snapshot(&["existing", "new"]))
    );

    Ok(())
}

#[tokio::test]
async fn runtime_exits_when_every_sender_is_gone() -> TestResult {
    init_tracing();

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(4);
    drop(rt_tx);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let runtime = Runtime::new(
        CoreRuntime::new(WatchRegistry::new()),
        rt_rx,
        FakeExecutor::new(executed.clone()),
    );

    dirwatch_test_utils::with_timeout(runtime.run()).await?;
    assert!(executed.lock().unwrap().is_empty());

    Ok(())
}
