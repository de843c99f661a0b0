// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job reconstruction from wire JSON.
//!
//! The variant set is closed: `jobType_` selects a create job, an update job,
//! or (missing or unrecognized tag) a generic job. Missing fields fall back to
//! defaults; checking that a variant has what it needs is left to the
//! operation that runs it unless [`ReconstructOptions::strict`] is set.

use aj_core::{
    AudienceCreateParams, AudienceUpdateParams, Clock, Job, JobKind, JobStatus, LogEntry,
    Operator, Relationship, RuleGroup, Term, AUDIENCE_CREATE_JOB_TYPE,
    AUDIENCE_UPDATE_JOB_TYPE,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::fields;
use crate::replay::replay_status;
use crate::schema::{WireJob, WireLog, WireRule};
use crate::WireError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructOptions {
    /// Reject variant jobs with missing required fields or unparseable rule
    /// tokens instead of deferring the failure to the operation.
    pub strict: bool,
}

impl ReconstructOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Parse a JSON string and reconstruct the job tree it holds.
pub fn from_json_str(
    payload: &str,
    clock: &impl Clock,
    options: ReconstructOptions,
) -> Result<Job, WireError> {
    let value: Value = serde_json::from_str(payload)?;
    reconstruct(&value, clock, options)
}

/// Rebuild a job tree from an already-parsed wire value.
///
/// In the default (lenient) mode this never fails: anything that is not an
/// object is read as an empty one.
pub fn reconstruct(
    value: &Value,
    clock: &impl Clock,
    options: ReconstructOptions,
) -> Result<Job, WireError> {
    build(WireJob::from_value(value), clock, options)
}

fn build(wire: WireJob, clock: &impl Clock, options: ReconstructOptions) -> Result<Job, WireError> {
    let decoder = Decoder { strict: options.strict, job_id: wire.id };
    let kind = match wire.job_type.as_str() {
        AUDIENCE_CREATE_JOB_TYPE => JobKind::AudienceCreate(decoder.create_params(&wire)?),
        AUDIENCE_UPDATE_JOB_TYPE => JobKind::AudienceUpdate(decoder.update_params(&wire)?),
        _ => JobKind::Generic,
    };
    let status = JobStatus::from_wire(&wire.status).unwrap_or_default();

    let WireJob { id, index, offset, error, logs, jobs, .. } = wire;
    let children =
        jobs.into_iter().map(|child| build(child, clock, options)).collect::<Result<Vec<_>, _>>()?;
    let logs = logs.into_iter().map(decode_log).collect();

    let mut job = Job::resumed(id, index, kind, logs, children, offset);
    replay_status(&mut job, status, &error, clock);
    Ok(job)
}

struct Decoder {
    strict: bool,
    job_id: i64,
}

impl Decoder {
    fn create_params(&self, wire: &WireJob) -> Result<AudienceCreateParams, WireError> {
        let mut params = AudienceCreateParams::new(
            wire.audience_name.clone().unwrap_or_default(),
            wire.floodlight_id.clone().unwrap_or_default(),
        )
        .description(wire.description.clone().unwrap_or_default())
        .lifespan(lifespan(wire.lifespan))
        .shared(wire.is_shared.unwrap_or_default());

        let group = self.rule_group(wire.relationship.as_deref(), wire.rules.as_deref())?;
        if !group.is_empty() {
            params.rules = Some(group);
        }
        self.require(params.missing_fields())?;
        Ok(params)
    }

    fn update_params(&self, wire: &WireJob) -> Result<AudienceUpdateParams, WireError> {
        let params =
            AudienceUpdateParams::new(wire.audience_id.clone().unwrap_or_default())
                .name(wire.audience_name.clone().unwrap_or_default())
                .description(wire.description.clone().unwrap_or_default())
                .lifespan(lifespan(wire.lifespan))
                .changed_attributes(wire.changed_attributes.clone().unwrap_or_default())
                .shared(wire.is_shared.unwrap_or_default());
        self.require(params.missing_fields())?;
        Ok(params)
    }

    fn require(&self, missing: Vec<&'static str>) -> Result<(), WireError> {
        match missing.first() {
            Some(&field) if self.strict => Err(WireError::MissingField { job_id: self.job_id, field }),
            _ => Ok(()),
        }
    }

    /// Relationship defaults to AND.
    fn rule_group(
        &self,
        relationship: Option<&str>,
        rules: Option<&[WireRule]>,
    ) -> Result<RuleGroup, WireError> {
        let relationship = match relationship.map(str::parse::<Relationship>) {
            Some(Ok(relationship)) => relationship,
            Some(Err(e)) if self.strict => return Err(self.invalid(fields::RELATIONSHIP, e)),
            _ => Relationship::And,
        };

        let mut group = RuleGroup::new(relationship);
        for rule in rules.unwrap_or_default() {
            group = match &rule.rules {
                Some(nested) => {
                    group.with_group(self.rule_group(rule.relationship.as_deref(), Some(nested))?)
                }
                None => group.with_term(self.term(rule)?),
            };
        }
        Ok(group)
    }

    fn term(&self, rule: &WireRule) -> Result<Term, WireError> {
        let raw = rule.operator.as_deref().unwrap_or_default();
        let operator = match raw.parse::<Operator>() {
            Ok(operator) => operator,
            Err(e) if self.strict => return Err(self.invalid(fields::OPERATOR, e)),
            Err(_) => Operator::Equals,
        };
        Ok(Term::new(
            rule.variable.clone().unwrap_or_default(),
            operator,
            rule.value.clone().unwrap_or_default(),
        ))
    }

    fn invalid(&self, field: &'static str, reason: impl std::fmt::Display) -> WireError {
        WireError::InvalidField { job_id: self.job_id, field, reason: reason.to_string() }
    }
}

fn lifespan(days: Option<u64>) -> u32 {
    u32::try_from(days.unwrap_or_default()).unwrap_or(u32::MAX)
}

/// `{date, message}` with an RFC 3339 date and a string message becomes a
/// typed entry; anything else is passed through untouched.
fn decode_log(value: Value) -> LogEntry {
    let typed = WireLog::deserialize(&value).ok().and_then(|log| {
        let date = DateTime::parse_from_rfc3339(&log.date).ok()?.with_timezone(&Utc);
        Some(LogEntry::new(date, log.message))
    });
    typed.unwrap_or(LogEntry::Raw(value))
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
