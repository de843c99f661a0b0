// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aj_core::test_support::batch_job;
use aj_core::FakeClock;
use yare::parameterized;

fn logged_tree(clock: &FakeClock) -> Job {
    let mut child = Job::new(2, 0);
    child.run(clock);
    child.complete(clock);
    let mut root = batch_job(vec![child]);
    root.run(clock);
    root
}

#[test]
fn flush_writes_at_offset_and_advances_it() {
    let clock = FakeClock::new();
    let store = MemoryLogStore::new();
    let mut job = logged_tree(&clock);
    job.offset = 4;
    store.write(0, &["a".into(), "b".into(), "c".into(), "d".into()]).unwrap();

    let written = write_logs(&mut job, &store).unwrap();

    assert_eq!(written, 3);
    assert_eq!(job.offset, 7);
    assert!(job.flatten_logs().is_empty());
    assert_eq!(
        store.rows(),
        vec![
            "a",
            "b",
            "c",
            "d",
            "2026-01-01T00:00:00Z [job 1] started",
            "2026-01-01T00:00:00Z [job 2] started",
            "2026-01-01T00:00:00Z [job 2] completed",
        ]
    );
}

#[test]
fn flush_without_logs_does_not_write() {
    let clock = FakeClock::new();
    let store = MemoryLogStore::new();
    let mut job = logged_tree(&clock);

    write_logs(&mut job, &store).unwrap();
    assert_eq!(store.write_count(), 1);

    assert_eq!(write_logs(&mut job, &store).unwrap(), 0);
    assert_eq!(store.write_count(), 1);
    assert_eq!(job.offset, 3);
}

#[test]
fn rewind_resets_whole_tree() {
    let mut job = batch_job(vec![Job::new(2, 0), Job::new(3, 1)]);
    job.offset = 9;
    job.jobs_mut()[1].offset = 4;
    rewind_offsets(&mut job);
    assert_eq!(job.offset, 0);
    assert!(job.jobs().iter().all(|child| child.offset == 0));
}

#[parameterized(
    append = { vec!["a", "b"], 2, vec!["a", "b", "x"] },
    overwrite = { vec!["a", "b", "c"], 1, vec!["a", "x", "c"] },
    pad = { vec!["a"], 3, vec!["a", "", "", "x"] },
)]
fn splice_cases(initial: Vec<&str>, at: usize, expected: Vec<&str>) {
    let mut lines: Vec<String> = initial.into_iter().map(String::from).collect();
    splice(&mut lines, at, &["x".to_string()]);
    assert_eq!(lines, expected);
}

#[test]
fn log_range_clamps_start_row() {
    assert_eq!(LogRange::new("Logs", 0).start_row, 1);
    assert_eq!(LogRange::default(), LogRange::new("Logs", 1));
}

#[test]
fn file_store_keeps_rows_before_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Audit.log");
    std::fs::write(&path, "Header\n").unwrap();
    let store = FileLogStore::new(dir.path(), &LogRange::new("Audit", 2));

    store.write(0, &["one".to_string(), "two".to_string()]).unwrap();
    store.write(2, &["three".to_string()]).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Header\none\ntwo\nthree\n");

    store.clear().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Header\n");
}

#[test]
fn file_store_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested");
    let store = FileLogStore::new(&nested, &LogRange::default());

    store.clear().unwrap();
    store.write(1, &["late".to_string()]).unwrap();

    assert_eq!(store.path(), nested.join("Logs.log"));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "\nlate\n");
}
