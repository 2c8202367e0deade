// End-to-end behaviour: rule file -> registry -> poll ticks -> dispatches.

mod common;
use crate::common::{home, mock_fs_with_dirs, tick};

use std::path::Path;

use dirwatch::config::{default_config_path, load_and_validate};
use dirwatch::engine::{CoreRuntime, Dispatch};
use dirwatch::errors::DirwatchError;
use dirwatch::exec::{CommandSpec, ENV_WATCH_CREATED, ENV_WATCH_REMOVED};
use dirwatch::fs::mock::MockFileSystem;
use dirwatch::fs::FileSystem;
use dirwatch::watch::{MtimeTracker, WatchRegistry};
use dirwatch_test_utils::recording_source::RecordingSource;

struct Harness {
    fs: MockFileSystem,
    core: CoreRuntime,
    source: RecordingSource,
}

impl Harness {
    fn load(fs: MockFileSystem, rules: &str) -> Result<Self, DirwatchError> {
        let path = default_config_path(&home());
        fs.add_file(&path, rules);

        let rules = load_and_validate(&fs, &path, &home())?.expect("rule file exists");
        let mut source = RecordingSource::new();
        let mut registry = WatchRegistry::new();
        registry.register_all(rules.into_rules(), &fs, &mut source)?;

        Ok(Self {
            fs,
            core: CoreRuntime::new(registry),
            source,
        })
    }

    fn tracker(&self, dir: &str) -> MtimeTracker {
        MtimeTracker::new(Some(self.fs.modified(Path::new(dir)).unwrap()))
    }

    fn tick(&mut self, dir: &str, tracker: &mut MtimeTracker) -> Vec<Dispatch> {
        tick(&self.fs, Path::new(dir), tracker, &mut self.core)
            .dispatches()
            .cloned()
            .collect()
    }
}

#[test]
fn created_file_in_etc_dispatches_notify() {
    let fs = mock_fs_with_dirs(&["/etc"]);
    fs.add_file("/etc/hosts", "");
    let mut h = Harness::load(fs, "/etc notify.sh\n").unwrap();
    let mut tracker = h.tracker("/etc");

    h.fs.add_file("/etc/newfile", "");
    let dispatched = h.tick("/etc", &mut tracker);

    assert_eq!(dispatched.len(), 1);
    let spec = CommandSpec::from_dispatch(&dispatched[0]).unwrap();
    assert_eq!(spec.program, "notify.sh");
    assert!(spec.args.is_empty());
    assert_eq!(spec.env_var(ENV_WATCH_CREATED), Some(r#"["newfile"]"#));
    assert_eq!(spec.env_var(ENV_WATCH_REMOVED), Some("[]"));
}

#[test]
fn removal_does_not_fire_a_creation_only_rule() {
    let fs = mock_fs_with_dirs(&["/home/alice/Pictures"]);
    fs.add_file("/home/alice/Pictures/cat.jpg", "");
    let mut h = Harness::load(fs, "+ Pictures upload.sh\n").unwrap();
    let dir = "/home/alice/Pictures";
    let mut tracker = h.tracker(dir);

    h.fs.remove("/home/alice/Pictures/cat.jpg");
    assert!(h.tick(dir, &mut tracker).is_empty());

    // The removal was still recorded: re-adding counts as a creation.
    h.fs.add_file("/home/alice/Pictures/cat.jpg", "");
    let dispatched = h.tick(dir, &mut tracker);
    assert_eq!(dispatched.len(), 1);
    assert_eq!(dispatched[0].command, "upload.sh");
    assert_eq!(dispatched[0].created, vec!["cat.jpg".to_string()]);
}

#[test]
fn removal_rule_sees_both_sides_of_a_mixed_change() {
    let fs = mock_fs_with_dirs(&["/home/alice/todo"]);
    fs.add_file("/home/alice/todo/old.md", "");
    let mut h = Harness::load(fs, "- todo sync.sh\n").unwrap();
    let dir = "/home/alice/todo";
    let mut tracker = h.tracker(dir);

    // Both changes land within one poll interval.
    h.fs.add_file("/home/alice/todo/new.md", "");
    h.fs.remove("/home/alice/todo/old.md");
    let dispatched = h.tick(dir, &mut tracker);

    assert_eq!(dispatched.len(), 1);
    let spec = CommandSpec::from_dispatch(&dispatched[0]).unwrap();
    assert_eq!(spec.program, "sync.sh");
    assert_eq!(spec.env_var(ENV_WATCH_CREATED), Some(r#"["new.md"]"#));
    assert_eq!(spec.env_var(ENV_WATCH_REMOVED), Some(r#"["old.md"]"#));
}

#[test]
fn syntax_error_registers_nothing() {
    let fs = mock_fs_with_dirs(&["/etc"]);
    let path = default_config_path(&home());
    fs.add_file(&path, "/etc notify.sh\nbogus\n");

    match load_and_validate(&fs, &path, &home()) {
        Err(DirwatchError::Syntax { line_no, line }) => {
            assert_eq!(line_no, 2);
            assert_eq!(line, "bogus");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn bogus_directory_aborts_before_any_registration() {
    let fs = mock_fs_with_dirs(&["/etc"]);
    let result = Harness::load(
        fs,
        "/etc notify.sh\nbogus line without a command target\n",
    );
    assert!(matches!(result, Err(DirwatchError::MissingDirectory(_))));
}

#[test]
fn two_rules_on_one_directory_share_a_watch_and_both_fire() {
    let fs = mock_fs_with_dirs(&["/home/alice/inbox"]);
    let mut h = Harness::load(fs, "inbox a.sh\n+ ./inbox/ b.sh\n").unwrap();
    let dir = "/home/alice/inbox";
    let mut tracker = h.tracker(dir);

    assert_eq!(h.source.watched().len(), 1);
    assert_eq!(h.core.registry().len(), 1);

    h.fs.add_file("/home/alice/inbox/mail", "");
    let commands: Vec<String> = h
        .tick(dir, &mut tracker)
        .into_iter()
        .map(|d| d.command)
        .collect();
    assert_eq!(commands, vec!["a.sh", "b.sh"]);
}

#[test]
fn mtime_bump_without_listing_change_dispatches_nothing() {
    let fs = mock_fs_with_dirs(&["/etc"]);
    fs.add_file("/etc/hosts", "");
    let mut h = Harness::load(fs, "/etc notify.sh\n").unwrap();
    let mut tracker = h.tracker("/etc");

    h.fs.touch("/etc");
    assert!(h.tick("/etc", &mut tracker).is_empty());

    // No-op ticks afterwards stay no-ops.
    assert!(h.tick("/etc", &mut tracker).is_empty());
    assert!(h.tick("/etc", &mut tracker).is_empty());
}
