// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in operations.
//!
//! Batch operations discover their children on first call, then work
//! through them until the invocation deadline. A batch job is only
//! completed once every child is terminal, so the caller keeps invoking it
//! with the returned tree until then.

use crate::log_store::{self, rewind_offsets};
use crate::registry::{OperationContext, OperationError};
use aj_core::{
    AudienceCreateParams, AudienceUpdateParams, Clock, Job, JobKind, AUDIENCE_CREATE_JOB_TYPE,
    AUDIENCE_UPDATE_JOB_TYPE,
};

pub const CREATE_AUDIENCES: &str = "createAudiences";
pub const CREATE_AUDIENCE: &str = "createAudience";
pub const UPDATE_AUDIENCES: &str = "updateAudiences";
pub const UPDATE_AUDIENCE: &str = "updateAudience";
pub const UPDATE_ALL_AUDIENCES: &str = "updateAllAudiences";
pub const CLEAR_LOGS: &str = "clearLogs";
pub const WRITE_LOGS: &str = "writeLogs";

// ── Batch operations ────────────────────────────────────────────────────

/// Create every audience the backend has pending create requests for.
pub fn create_audiences<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    run_batch(ctx, job, |first_id| {
        let requests = ctx.backend.create_requests()?;
        Ok(children(first_id, requests, Job::audience_create))
    })
}

/// Apply every pending audience edit.
pub fn update_audiences<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    run_batch(ctx, job, |first_id| {
        let requests = ctx.backend.update_requests()?;
        Ok(children(first_id, requests, Job::audience_update))
    })
}

/// Push the current settings of every known audience.
pub fn update_all_audiences<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    run_batch(ctx, job, |first_id| {
        let audiences = ctx.backend.existing_audiences()?;
        Ok(children(first_id, audiences, Job::audience_update))
    })
}

fn children<P>(first_id: i64, params: Vec<P>, make: fn(i64, i64, P) -> Job) -> Vec<Job> {
    params
        .into_iter()
        .enumerate()
        .map(|(i, params)| make(first_id + i as i64, i as i64, params))
        .collect()
}

fn run_batch<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
    discover: impl FnOnce(i64) -> Result<Vec<Job>, OperationError>,
) -> Result<(), OperationError> {
    if job.is_terminal() {
        return Ok(());
    }
    if job.is_pending() {
        job.run(ctx.clock);
    }

    if job.jobs().is_empty() {
        let found = discover(job.next_child_id())?;
        if found.is_empty() {
            job.log("nothing to do", ctx.clock);
            job.complete(ctx.clock);
            return Ok(());
        }
        job.log(format!("found {} audiences", found.len()), ctx.clock);
        job.populate(found);
    }

    step_children(ctx, job, process_child::<C>);
    Ok(())
}

/// Work through the non-terminal children in order until the deadline, then
/// complete the parent once every child is terminal. Children fail
/// independently.
fn step_children<C, F>(ctx: &OperationContext<'_, C>, job: &mut Job, process: F)
where
    C: Clock,
    F: Fn(&OperationContext<'_, C>, &mut Job) -> Result<(), OperationError>,
{
    let mut processed = 0usize;
    for child in job.jobs_mut().iter_mut().filter(|child| !child.is_terminal()) {
        // Always make progress, even when invoked past the deadline.
        if processed > 0 && ctx.out_of_time() {
            break;
        }
        if let Err(e) = process(ctx, child) {
            tracing::warn!(job_id = child.id, operation = ctx.operation, error = %e, "child failed");
            child.error(e.to_string(), ctx.clock);
        }
        processed += 1;
    }

    let remaining = job.jobs().iter().filter(|child| !child.is_terminal()).count();
    tracing::info!(
        job_id = job.id,
        operation = ctx.operation,
        processed,
        remaining,
        "batch step finished"
    );

    if job.children_terminal() {
        let failed = job.jobs().iter().filter(|child| child.is_error()).count();
        if failed > 0 {
            let line = format!("{} of {} audiences failed", failed, job.jobs().len());
            job.log(line, ctx.clock);
        }
        job.complete(ctx.clock);
    }
}

fn process_child<C: Clock>(
    ctx: &OperationContext<'_, C>,
    child: &mut Job,
) -> Result<(), OperationError> {
    match child.kind {
        JobKind::AudienceCreate(_) => create_audience(ctx, child),
        JobKind::AudienceUpdate(_) => update_audience(ctx, child),
        JobKind::Generic => Err(OperationError::WrongJobType {
            operation: ctx.operation,
            expected: "an audience job",
            found: child.job_type(),
        }),
    }
}

// ── Single-audience operations ──────────────────────────────────────────
//
// A generic job holding children groups single-audience jobs: the operation
// is applied to each child in turn, like a batch that skips discovery.

fn is_group(job: &Job) -> bool {
    matches!(job.kind, JobKind::Generic) && !job.jobs().is_empty()
}

fn run_group<C, F>(ctx: &OperationContext<'_, C>, job: &mut Job, operation: F)
where
    C: Clock,
    F: Fn(&OperationContext<'_, C>, &mut Job) -> Result<(), OperationError>,
{
    if job.is_pending() {
        job.run(ctx.clock);
    }
    step_children(ctx, job, operation);
}

pub fn create_audience<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    if job.is_terminal() {
        return Ok(());
    }
    if is_group(job) {
        run_group(ctx, job, create_audience::<C>);
        return Ok(());
    }
    let params = create_params(ctx, job)?;
    if job.is_pending() {
        job.run(ctx.clock);
    }

    let audience_id = ctx.backend.create_audience(&params)?;
    tracing::info!(job_id = job.id, audience = %params.name, %audience_id, "created audience");
    job.log(format!("created audience {} ({})", params.name, audience_id), ctx.clock);
    job.complete(ctx.clock);
    Ok(())
}

pub fn update_audience<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    if job.is_terminal() {
        return Ok(());
    }
    if is_group(job) {
        run_group(ctx, job, update_audience::<C>);
        return Ok(());
    }
    let params = update_params(ctx, job)?;
    if job.is_pending() {
        job.run(ctx.clock);
    }

    ctx.backend.update_audience(&params)?;
    tracing::info!(job_id = job.id, audience_id = %params.audience_id, "updated audience");
    let changed = if params.changed_attributes.is_empty() {
        "all attributes".to_string()
    } else {
        params.changed_attributes.join(", ")
    };
    job.log(format!("updated audience {} ({})", params.audience_id, changed), ctx.clock);
    job.complete(ctx.clock);
    Ok(())
}

fn create_params<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &Job,
) -> Result<AudienceCreateParams, OperationError> {
    let JobKind::AudienceCreate(params) = &job.kind else {
        return Err(wrong_type(ctx, AUDIENCE_CREATE_JOB_TYPE, job));
    };
    match params.missing_fields().first() {
        Some(&field) => Err(OperationError::MissingParameters { job_id: job.id, field }),
        None => Ok(params.clone()),
    }
}

fn update_params<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &Job,
) -> Result<AudienceUpdateParams, OperationError> {
    let JobKind::AudienceUpdate(params) = &job.kind else {
        return Err(wrong_type(ctx, AUDIENCE_UPDATE_JOB_TYPE, job));
    };
    match params.missing_fields().first() {
        Some(&field) => Err(OperationError::MissingParameters { job_id: job.id, field }),
        None => Ok(params.clone()),
    }
}

fn wrong_type<C: Clock>(
    ctx: &OperationContext<'_, C>,
    expected: &'static str,
    job: &Job,
) -> OperationError {
    OperationError::WrongJobType { operation: ctx.operation, expected, found: job.job_type() }
}

// ── Log maintenance ─────────────────────────────────────────────────────

/// Empty the log store and start the tree's logs over from row 0.
pub fn clear_logs<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    ctx.log_store.clear()?;
    rewind_offsets(job);
    job.clear_logs();
    tracing::info!(job_id = job.id, "cleared log store");
    job.complete(ctx.clock);
    Ok(())
}

/// Flush the tree's pending logs to the store.
pub fn write_logs<C: Clock>(
    ctx: &OperationContext<'_, C>,
    job: &mut Job,
) -> Result<(), OperationError> {
    job.complete(ctx.clock);
    log_store::write_logs(job, ctx.log_store)?;
    Ok(())
}

#[cfg(test)]
#[path = "operations_tests.rs"]
mod tests;
