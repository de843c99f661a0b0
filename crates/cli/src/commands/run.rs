// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aj run`: drive a batch through an operation until every job is terminal

use aj_core::{Clock, Job, SystemClock};
use aj_engine::{env, LocalInvoker, OperationRegistry, RunError, Runner, RunnerConfig};
use aj_wire::{reconstruct, ReconstructOptions};
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::engine_args::EngineArgs;
use crate::exit_error::ExitError;
use crate::output::{print_batch, OutputFormat};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Operation name (see `aj operations`)
    pub operation: String,

    /// Initial jobs as wire JSON (a job or an array of jobs); `-` reads stdin.
    /// Defaults to a single empty job.
    #[arg(long, value_name = "FILE")]
    pub jobs: Option<PathBuf>,

    /// Give up after this many rounds [env: AJ_MAX_ROUNDS]
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

pub async fn handle(args: RunArgs, format: OutputFormat) -> Result<()> {
    if !OperationRegistry::global().contains(&args.operation) {
        return Err(ExitError::usage(format!("unknown operation: {}", args.operation)).into());
    }

    let jobs = match &args.jobs {
        Some(path) => load_jobs(path, &SystemClock)?,
        None => vec![Job::new(1, 0)],
    };
    let config = RunnerConfig {
        max_rounds: args.max_rounds.filter(|n| *n > 0).unwrap_or_else(env::max_rounds),
    };

    let log_store = args.engine.log_store();
    let dispatcher = args.engine.dispatcher(log_store.clone())?;
    let runner = Runner::new(LocalInvoker::new(dispatcher), log_store, SystemClock, config);

    match runner.run(&args.operation, jobs).await {
        Ok(jobs) => print_batch(&jobs, &[], format),
        Err(RunError::Failed(batch)) => {
            print_batch(&batch.jobs, &batch.errors, format)?;
            Err(ExitError::failed(format!("{} job(s) failed", batch.errors.len())).into())
        }
        Err(RunError::RoundLimit { rounds, jobs }) => {
            print_batch(&jobs, &[], format)?;
            Err(ExitError::failed(format!("batch still unfinished after {} rounds", rounds)).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Read initial jobs from a file, or stdin for `-`.
pub fn load_jobs(path: &Path, clock: &impl Clock) -> Result<Vec<Job>, ExitError> {
    let text = if path == Path::new("-") {
        super::arg_or_stdin(None).map_err(|e| ExitError::usage(e.to_string()))?
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| ExitError::usage(format!("{}: {}", path.display(), e)))?
    };
    parse_jobs(&text, clock)
}

pub fn parse_jobs(text: &str, clock: &impl Clock) -> Result<Vec<Job>, ExitError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ExitError::usage(format!("invalid jobs JSON: {}", e)))?;
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    items
        .iter()
        .map(|item| reconstruct(item, clock, ReconstructOptions::default()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ExitError::usage(format!("invalid job: {}", e)))
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
