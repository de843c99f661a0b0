// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use aj_core::{Job, JobKind, LogEntry, Rule, RuleGroup};
use chrono::SecondsFormat;
use serde_json::Value;

use crate::schema::{WireJob, WireLog, WireRule};
use crate::WireError;

/// Encode a job tree into its wire JSON object.
pub fn encode(job: &Job) -> Value {
    // Plain structs with string keys: serialization cannot fail.
    serde_json::to_value(wire_job(job)).unwrap_or_default()
}

/// Encode a job tree as a JSON string.
pub fn to_json_string(job: &Job) -> Result<String, WireError> {
    Ok(serde_json::to_string(&wire_job(job))?)
}

fn wire_job(job: &Job) -> WireJob {
    let mut wire = WireJob {
        id: job.id,
        index: job.index,
        status: job.status().as_wire_str().to_string(),
        offset: job.offset,
        error: job.error_message().to_string(),
        job_type: job.job_type().to_string(),
        logs: job.logs().iter().map(encode_log).collect(),
        jobs: job.jobs().iter().map(wire_job).collect(),
        ..WireJob::default()
    };

    match &job.kind {
        JobKind::Generic => {}
        JobKind::AudienceCreate(params) => {
            wire.audience_name = Some(params.name.clone());
            wire.description = Some(params.description.clone());
            wire.lifespan = Some(u64::from(params.lifespan));
            wire.floodlight_id = Some(params.floodlight_id.clone());
            wire.is_shared = Some(params.shared);
            wire.relationship = params.rules.as_ref().map(|group| group.relationship.to_string());
            wire.rules = Some(params.rules.as_ref().map(wire_rules).unwrap_or_default());
        }
        JobKind::AudienceUpdate(params) => {
            wire.audience_id = Some(params.audience_id.clone());
            wire.audience_name = Some(params.name.clone());
            wire.description = Some(params.description.clone());
            wire.lifespan = Some(u64::from(params.lifespan));
            wire.changed_attributes = Some(params.changed_attributes.clone());
            wire.is_shared = Some(params.shared);
        }
    }
    wire
}

fn encode_log(entry: &LogEntry) -> Value {
    match entry {
        LogEntry::Entry { date, message } => {
            let log = WireLog {
                date: date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                message: message.clone(),
            };
            serde_json::to_value(log).unwrap_or_default()
        }
        LogEntry::Raw(value) => value.clone(),
    }
}

fn wire_rules(group: &RuleGroup) -> Vec<WireRule> {
    group
        .rules
        .iter()
        .map(|rule| match rule {
            Rule::Term(term) => WireRule {
                variable: Some(term.variable.clone()),
                operator: Some(term.operator.as_str().to_string()),
                value: Some(term.value.clone()),
                ..WireRule::default()
            },
            Rule::Group(nested) => WireRule {
                relationship: Some(nested.relationship.to_string()),
                rules: Some(wire_rules(nested)),
                ..WireRule::default()
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "encode_tests.rs"]
mod tests;
