// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aj_core::{FakeClock, JobKind, LogEntry};
use yare::parameterized;

fn resumed() -> Job {
    Job::resumed(3, 0, JobKind::Generic, Vec::new(), Vec::new(), 0)
}

#[parameterized(
    pending = { JobStatus::Pending, &[] },
    running = { JobStatus::Running, &["started"] },
    complete = { JobStatus::Complete, &["completed"] },
    error = { JobStatus::Error, &["error: boom"] },
)]
fn replay_drives_transition(status: JobStatus, lines: &[&str]) {
    let clock = FakeClock::new();
    let mut job = resumed();

    assert!(replay_status(&mut job, status, "boom", &clock));

    assert_eq!(job.status(), status);
    let messages: Vec<&str> = job.logs().iter().filter_map(LogEntry::message).collect();
    assert_eq!(messages, lines);
}

#[test]
fn replay_keeps_error_message() {
    let clock = FakeClock::new();
    let mut job = resumed();
    replay_status(&mut job, JobStatus::Error, "quota exceeded", &clock);
    assert_eq!(job.error_message(), "quota exceeded");
}

#[test]
fn replay_happens_once() {
    let clock = FakeClock::new();
    let mut job = resumed();
    assert!(replay_status(&mut job, JobStatus::Complete, "", &clock));
    assert!(!replay_status(&mut job, JobStatus::Error, "late", &clock));
    assert!(job.is_complete());
}

#[test]
fn fresh_jobs_are_not_replayed() {
    let clock = FakeClock::new();
    let mut job = Job::new(1, 0);
    assert!(!replay_status(&mut job, JobStatus::Complete, "", &clock));
    assert!(job.is_pending());
    assert!(job.logs().is_empty());
}
