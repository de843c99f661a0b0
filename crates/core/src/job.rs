// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job tree and state machine.
//!
//! A [`Job`] owns its children exclusively. Status only moves through the
//! transition methods ([`Job::run`], [`Job::complete`], [`Job::error`]) so
//! that every change leaves a log line behind.

use crate::audience::{AudienceCreateParams, AudienceUpdateParams};
use crate::clock::Clock;
use crate::log::LogEntry;
use serde::{Deserialize, Serialize};

/// Status of a job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Created, not yet picked up by an operation
    #[default]
    Pending,
    /// An operation has started on it
    Running,
    Complete,
    Error,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Error)
    }

    /// Upper-case name used on the wire.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Error => "ERROR",
        }
    }

    /// Parse a wire status; `None` for anything unrecognized.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(JobStatus::Pending),
            "RUNNING" => Some(JobStatus::Running),
            "COMPLETE" => Some(JobStatus::Complete),
            "ERROR" => Some(JobStatus::Error),
            _ => None,
        }
    }
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Running => "running",
        Complete => "complete",
        Error => "error",
    }
}

pub const GENERIC_JOB_TYPE: &str = "Job";
pub const AUDIENCE_CREATE_JOB_TYPE: &str = "AudienceCreateJob";
pub const AUDIENCE_UPDATE_JOB_TYPE: &str = "AudienceUpdateJob";

/// Variant payload attached to a job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum JobKind {
    #[default]
    Generic,
    AudienceCreate(AudienceCreateParams),
    AudienceUpdate(AudienceUpdateParams),
}

impl JobKind {
    /// Tag identifying the variant on the wire.
    pub fn job_type(&self) -> &'static str {
        match self {
            JobKind::Generic => GENERIC_JOB_TYPE,
            JobKind::AudienceCreate(_) => AUDIENCE_CREATE_JOB_TYPE,
            JobKind::AudienceUpdate(_) => AUDIENCE_UPDATE_JOB_TYPE,
        }
    }
}

/// A unit of work and its sub-units.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    /// Position among siblings
    pub index: i64,
    status: JobStatus,
    logs: Vec<LogEntry>,
    jobs: Vec<Job>,
    /// Rows already written to the external log store
    pub offset: u64,
    error: String,
    pub kind: JobKind,
    /// Set on jobs rebuilt from the wire; permits a single status replay.
    auto_run: bool,
}

impl Job {
    /// Fresh pending job with no children.
    pub fn new(id: i64, index: i64) -> Self {
        Self {
            id,
            index,
            status: JobStatus::Pending,
            logs: Vec::new(),
            jobs: Vec::new(),
            offset: 0,
            error: String::new(),
            kind: JobKind::Generic,
            auto_run: false,
        }
    }

    pub fn audience_create(id: i64, index: i64, params: AudienceCreateParams) -> Self {
        Self::new(id, index).with_kind(JobKind::AudienceCreate(params))
    }

    pub fn audience_update(id: i64, index: i64, params: AudienceUpdateParams) -> Self {
        Self::new(id, index).with_kind(JobKind::AudienceUpdate(params))
    }

    /// Job rebuilt from wire state: pending until its status is replayed.
    ///
    /// `logs` and `jobs` are taken as-is; the caller is expected to replay
    /// the wire status through the transition methods afterwards.
    pub fn resumed(
        id: i64,
        index: i64,
        kind: JobKind,
        logs: Vec<LogEntry>,
        jobs: Vec<Job>,
        offset: u64,
    ) -> Self {
        Self { logs, jobs, offset, kind, auto_run: true, ..Self::new(id, index) }
    }

    pub fn with_kind(mut self, kind: JobKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_children(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Force the job into `Running`, whatever its current state.
    ///
    /// Leaving `Error` drops the old message: it only describes an errored job.
    pub fn run(&mut self, clock: &impl Clock) {
        self.status = JobStatus::Running;
        self.error.clear();
        self.log("started", clock);
    }

    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = JobStatus::Complete;
        self.error.clear();
        self.log("completed", clock);
    }

    pub fn error(&mut self, message: impl Into<String>, clock: &impl Clock) {
        self.error = message.into();
        self.status = JobStatus::Error;
        let line = format!("error: {}", self.error);
        self.log(line, clock);
    }

    /// Append an informational log line.
    pub fn log(&mut self, message: impl Into<String>, clock: &impl Clock) {
        self.logs.push(LogEntry::new(clock.utc_now(), message));
    }

    /// Consume the replay permit. Returns `true` at most once, and only for
    /// jobs built with [`Job::resumed`].
    pub fn take_auto_run(&mut self) -> bool {
        std::mem::take(&mut self.auto_run)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Failure message; empty unless the job is in `Error`.
    pub fn error_message(&self) -> &str {
        &self.error
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut [Job] {
        &mut self.jobs
    }

    pub fn auto_run(&self) -> bool {
        self.auto_run
    }

    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Pending
    }

    pub fn is_running(&self) -> bool {
        self.status == JobStatus::Running
    }

    pub fn is_complete(&self) -> bool {
        self.status == JobStatus::Complete
    }

    pub fn is_error(&self) -> bool {
        self.status == JobStatus::Error
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn job_type(&self) -> &'static str {
        self.kind.job_type()
    }

    /// True once every child has reached a terminal status.
    pub fn children_terminal(&self) -> bool {
        self.jobs.iter().all(Job::is_terminal)
    }

    // ── Tree helpers ────────────────────────────────────────────────────

    /// Attach newly discovered children.
    ///
    /// Only an empty child list can be populated; returns `false` and leaves
    /// the job untouched otherwise.
    pub fn populate(&mut self, children: Vec<Job>) -> bool {
        if !self.jobs.is_empty() {
            return false;
        }
        self.jobs = children;
        true
    }

    /// Smallest id not used anywhere in this tree.
    pub fn next_child_id(&self) -> i64 {
        fn max_id(job: &Job) -> i64 {
            job.jobs.iter().map(max_id).fold(job.id, i64::max)
        }
        max_id(self) + 1
    }

    /// Every errored job in the tree, in pre-order.
    pub fn failures(&self) -> Vec<&Job> {
        let mut out = Vec::new();
        self.walk(&mut |job| {
            if job.is_error() {
                out.push(job);
            }
        });
        out
    }

    /// Log entries of the whole tree in pre-order, tagged with their job id.
    pub fn flatten_logs(&self) -> Vec<(i64, &LogEntry)> {
        let mut out = Vec::new();
        self.walk(&mut |job| out.extend(job.logs.iter().map(|entry| (job.id, entry))));
        out
    }

    /// Drop the log entries of the whole tree.
    pub fn clear_logs(&mut self) {
        self.logs.clear();
        for child in &mut self.jobs {
            child.clear_logs();
        }
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Job)) {
        visit(self);
        for child in &self.jobs {
            child.walk(visit);
        }
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            error: String = "",
        }
        set {
            id: i64 = 1,
            index: i64 = 0,
            status: JobStatus = JobStatus::Pending,
            logs: Vec<LogEntry> = Vec::new(),
            jobs: Vec<Job> = Vec::new(),
            offset: u64 = 0,
            kind: JobKind = JobKind::Generic,
            auto_run: bool = false,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
