// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{AudienceCreateParams, AudienceUpdateParams, Job, JobStatus};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job trees.
pub mod strategies {
    use crate::job::{Job, JobKind, JobStatus};
    use crate::log::LogEntry;
    use crate::rule::{Operator, Relationship, RuleGroup, Term};
    use crate::{AudienceCreateParams, AudienceUpdateParams};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Running),
            Just(JobStatus::Complete),
            Just(JobStatus::Error),
        ]
    }

    pub fn arb_log_entry() -> impl Strategy<Value = LogEntry> {
        (0i64..4_000_000_000, "[a-z][a-z ]{0,20}").prop_map(|(secs, message)| {
            let date = Utc.timestamp_opt(secs, 0).single().unwrap_or_default();
            LogEntry::new(date, message)
        })
    }

    pub fn arb_rule_group() -> impl Strategy<Value = RuleGroup> {
        let relationship = prop_oneof![Just(Relationship::And), Just(Relationship::Or)];
        let term = ("u[0-9]{1,2}", "[a-z0-9]{1,8}")
            .prop_map(|(variable, value)| Term::new(variable, Operator::Equals, value));
        (relationship, prop::collection::vec(term, 1..4)).prop_map(|(relationship, terms)| {
            terms.into_iter().fold(RuleGroup::new(relationship), RuleGroup::with_term)
        })
    }

    pub fn arb_job_kind() -> impl Strategy<Value = JobKind> {
        prop_oneof![
            Just(JobKind::Generic),
            ("[A-Za-z ]{1,12}", "[0-9]{1,6}", 0u32..540, any::<bool>(), proptest::option::of(arb_rule_group()))
                .prop_map(|(name, floodlight, lifespan, shared, rules)| {
                    let mut params =
                        AudienceCreateParams::new(name, floodlight).lifespan(lifespan).shared(shared);
                    params.rules = rules;
                    JobKind::AudienceCreate(params)
                }),
            ("[0-9]{1,9}", "[A-Za-z ]{0,12}", prop::collection::vec("[a-z]{1,8}", 0..3))
                .prop_map(|(id, name, changed)| {
                    JobKind::AudienceUpdate(
                        AudienceUpdateParams::new(id).name(name).changed_attributes(changed),
                    )
                }),
        ]
    }

    fn arb_leaf() -> impl Strategy<Value = Job> {
        (
            1i64..1000,
            0i64..10,
            arb_job_status(),
            "[a-z ]{0,12}",
            prop::collection::vec(arb_log_entry(), 0..3),
            0u64..100,
            arb_job_kind(),
        )
            .prop_map(|(id, index, status, error, logs, offset, kind)| {
                let error = if status == JobStatus::Error { error } else { String::new() };
                Job::builder()
                    .id(id)
                    .index(index)
                    .status(status)
                    .error(error)
                    .logs(logs)
                    .offset(offset)
                    .kind(kind)
                    .build()
            })
    }

    /// Job trees up to three levels deep.
    pub fn arb_job() -> impl Strategy<Value = Job> {
        arb_leaf().prop_recursive(3, 16, 4, |inner| {
            (arb_leaf(), prop::collection::vec(inner, 0..4))
                .prop_map(|(job, children)| job.with_children(children))
        })
    }
}

// ── Job factory functions ───────────────────────────────────────────────

/// Root job (id 1) holding the given children.
pub fn batch_job(children: Vec<Job>) -> Job {
    Job::new(1, 0).with_children(children)
}

pub fn job_with_status(id: i64, index: i64, status: JobStatus) -> Job {
    Job::builder().id(id).index(index).status(status).build()
}

pub fn failed_job(id: i64, index: i64, error: &str) -> Job {
    Job::builder().id(id).index(index).status(JobStatus::Error).error(error).build()
}

pub fn create_params(name: &str) -> AudienceCreateParams {
    AudienceCreateParams::new(name, "424242").description(format!("{} audience", name)).lifespan(30)
}

pub fn update_params(audience_id: &str) -> AudienceUpdateParams {
    AudienceUpdateParams::new(audience_id)
        .name(format!("audience {}", audience_id))
        .changed_attributes(vec!["name".to_string()])
}
