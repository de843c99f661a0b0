// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side driver for resumable batches.
//!
//! A single invocation may stop before its job tree is finished, so the
//! runner keeps feeding returned trees back until every top-level job is
//! terminal. Invocations are strictly sequential: one in flight at a time,
//! in array order.

use crate::invoker::{InvokeError, Invoker};
use crate::log_store::{write_logs, LogStore, LogStoreError};
use aj_core::{Clock, Job};
use aj_wire::{encode, from_json_str, ReconstructOptions, WireError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// One errored job found after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFailure {
    pub job_id: i64,
    pub operation_name: String,
    pub error_message: String,
}

impl std::fmt::Display for JobFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job {} ({}): {}", self.job_id, self.operation_name, self.error_message)
    }
}

/// Every failure of a finished batch, with the jobs it finished with.
#[derive(Debug)]
pub struct BatchFailure {
    pub errors: Vec<JobFailure>,
    pub jobs: Vec<Job>,
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} job(s) failed", self.errors.len())?;
        for failure in &self.errors {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for BatchFailure {}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Failed(BatchFailure),
    #[error("batch still unfinished after {rounds} rounds")]
    RoundLimit { rounds: usize, jobs: Vec<Job> },
    #[error("failed to flush logs: {0}")]
    LogStore(#[from] LogStoreError),
    #[error("invoker returned an unreadable job: {0}")]
    Wire(#[from] WireError),
    #[error("invocation transport failed: {0}")]
    Transport(String),
}

impl RunError {
    /// Jobs the run ended with, when it got far enough to have them.
    pub fn jobs(&self) -> Option<&[Job]> {
        match self {
            RunError::Failed(batch) => Some(&batch.jobs),
            RunError::RoundLimit { jobs, .. } => Some(jobs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub max_rounds: usize,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self { max_rounds: crate::env::max_rounds() }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_rounds: 1000 }
    }
}

pub struct Runner<I: Invoker, C: Clock> {
    invoker: I,
    log_store: Arc<dyn LogStore>,
    clock: C,
    config: RunnerConfig,
}

impl<I: Invoker, C: Clock> Runner<I, C> {
    pub fn new(invoker: I, log_store: Arc<dyn LogStore>, clock: C, config: RunnerConfig) -> Self {
        Self { invoker, log_store, clock, config }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Drive `jobs` through `operation` until every one is terminal.
    ///
    /// Returns the final jobs, or [`RunError::Failed`] carrying all of them
    /// when any job in any tree ended in error.
    pub async fn run(&self, operation: &str, jobs: Vec<Job>) -> Result<Vec<Job>, RunError> {
        let mut jobs = jobs;
        let mut rounds = 0usize;

        loop {
            self.flush(&mut jobs)?;
            let pending = jobs.iter().filter(|job| !job.is_terminal()).count();
            if pending == 0 {
                break;
            }
            if rounds >= self.config.max_rounds {
                tracing::warn!(operation, rounds, pending, "round limit reached");
                return Err(RunError::RoundLimit { rounds, jobs });
            }
            rounds += 1;
            tracing::info!(operation, round = rounds, pending, "starting round");

            for job in jobs.iter_mut().filter(|job| !job.is_terminal()) {
                *job = self.round_trip(operation, job).await?;
            }
        }

        let errors = collect_failures(operation, &jobs);
        tracing::info!(operation, rounds, failed = errors.len(), "batch finished");
        if errors.is_empty() {
            Ok(jobs)
        } else {
            Err(RunError::Failed(BatchFailure { errors, jobs }))
        }
    }

    async fn round_trip(&self, operation: &str, job: &Job) -> Result<Job, RunError> {
        let payload = encode(job).to_string();
        let returned = match self.invoker.invoke(operation, payload).await {
            Ok(returned) => returned,
            Err(InvokeError::Failed { payload, .. }) => {
                tracing::warn!(operation, job_id = job.id, "invocation failed");
                payload
            }
            Err(InvokeError::Transport(message)) => return Err(RunError::Transport(message)),
        };
        Ok(from_json_str(&returned, &self.clock, ReconstructOptions::default())?)
    }

    /// Write pending logs in array order without ever moving a job's offset
    /// behind rows another job already wrote.
    fn flush(&self, jobs: &mut [Job]) -> Result<(), RunError> {
        let mut cursor = jobs.iter().map(|job| job.offset).max().unwrap_or(0);
        for job in jobs.iter_mut() {
            if job.flatten_logs().is_empty() {
                continue;
            }
            job.offset = job.offset.max(cursor);
            write_logs(job, self.log_store.as_ref())?;
            cursor = job.offset;
        }
        Ok(())
    }
}

/// Errored jobs across all trees, in pre-order.
pub fn collect_failures(operation: &str, jobs: &[Job]) -> Vec<JobFailure> {
    jobs.iter()
        .flat_map(Job::failures)
        .map(|job| JobFailure {
            job_id: job.id,
            operation_name: operation.to_string(),
            error_message: job.error_message().to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
