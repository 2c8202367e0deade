mod common;
use crate::common::mock_fs_with_dirs;

use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};

use dirwatch::fs::FileSystem;
use dirwatch::watch::{poll_directory, MtimeTracker};
use dirwatch_test_utils::builders::snapshot;

#[test]
fn tracker_only_reports_strictly_newer_times() {
    let t = |s| UNIX_EPOCH + Duration::from_secs(s);

    let mut tracker = MtimeTracker::new(Some(t(10)));
    assert!(!tracker.is_newer(t(10)));
    assert!(!tracker.is_newer(t(9)));
    assert!(tracker.is_newer(t(11)));

    let empty = MtimeTracker::default();
    assert!(!empty.is_newer(t(100)));
}

#[test]
fn unchanged_mtime_is_a_no_op() {
    let fs = mock_fs_with_dirs(&["/w"]);
    let dir = Path::new("/w");
    let mut tracker = MtimeTracker::new(Some(fs.modified(dir).unwrap()));

    for _ in 0..3 {
        assert_eq!(poll_directory(&fs, dir, &mut tracker).unwrap(), None);
    }
}

#[test]
fn newer_mtime_relists_the_directory() {
    let fs = mock_fs_with_dirs(&["/w"]);
    let dir = Path::new("/w");
    let mut tracker = MtimeTracker::new(Some(fs.modified(dir).unwrap()));

    fs.add_file("/w/new.txt", "x");

    let listed = poll_directory(&fs, dir, &mut tracker).unwrap();
    assert_eq!(listed, Some(snapshot(&["new.txt"])));
    assert_eq!(tracker.last(), Some(fs.modified(dir).unwrap()));

    // Same mtime again: nothing.
    assert_eq!(poll_directory(&fs, dir, &mut tracker).unwrap(), None);
}

#[test]
fn metadata_only_change_still_relists() {
    let fs = mock_fs_with_dirs(&["/w"]);
    fs.add_file("/w/a", "");
    let dir = Path::new("/w");
    let mut tracker = MtimeTracker::new(Some(fs.modified(dir).unwrap()));

    fs.touch(dir);

    // The poller re-lists; deciding that nothing changed is the registry's job.
    assert_eq!(
        poll_directory(&fs, dir, &mut tracker).unwrap(),
        Some(snapshot(&["a"]))
    );
}

#[test]
fn nested_changes_are_invisible() {
    let fs = mock_fs_with_dirs(&["/w/sub"]);
    let dir = Path::new("/w");
    let mut tracker = MtimeTracker::new(Some(fs.modified(dir).unwrap()));

    fs.add_file("/w/sub/deep.txt", "");

    assert_eq!(poll_directory(&fs, dir, &mut tracker).unwrap(), None);
}

#[test]
fn failed_stat_leaves_the_tracker_alone() {
    let fs = mock_fs_with_dirs(&["/w"]);
    let dir = Path::new("/w");
    let before = fs.modified(dir).unwrap();
    let mut tracker = MtimeTracker::new(Some(before));

    fs.remove(dir);

    assert!(poll_directory(&fs, dir, &mut tracker).is_err());
    assert_eq!(tracker.last(), Some(before));
}
