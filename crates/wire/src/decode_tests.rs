// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aj_core::{FakeClock, Rule};
use serde_json::json;
use yare::parameterized;

fn lenient(value: Value) -> Job {
    reconstruct(&value, &FakeClock::new(), ReconstructOptions::default()).unwrap()
}

fn messages(job: &Job) -> Vec<&str> {
    job.logs().iter().filter_map(LogEntry::message).collect()
}

#[test]
fn base_fields_are_read() {
    let job = lenient(json!({
        "id_": 7, "index_": 2, "status_": "RUNNING", "offset_": 12, "jobType_": "Job",
    }));
    assert_eq!(job.id, 7);
    assert_eq!(job.index, 2);
    assert!(job.is_running());
    assert_eq!(job.offset, 12);
    assert_eq!(job.kind, JobKind::Generic);
}

#[test]
fn missing_fields_use_defaults() {
    let job = lenient(json!({}));
    assert_eq!(job.id, 0);
    assert!(job.is_pending());
    assert_eq!(job.offset, 0);
    assert_eq!(job.error_message(), "");
    assert!(job.logs().is_empty());
    assert!(job.jobs().is_empty());
}

#[parameterized(
    missing = { json!({"id_": 1}) },
    unknown = { json!({"id_": 1, "jobType_": "SomethingElse"}) },
    wrong_type = { json!({"id_": 1, "jobType_": 42}) },
)]
fn unrecognized_job_type_is_generic(value: Value) {
    assert_eq!(lenient(value).kind, JobKind::Generic);
}

#[parameterized(
    array = { json!([1, 2, 3]) },
    string = { json!("job") },
    null = { Value::Null },
)]
fn non_object_payload_is_an_empty_job(value: Value) {
    let job = lenient(value);
    assert_eq!(job.id, 0);
    assert!(job.is_pending());
}

#[test]
fn numeric_strings_are_accepted_for_ids() {
    let job = lenient(json!({"id_": "12", "index_": 3.0}));
    assert_eq!(job.id, 12);
    assert_eq!(job.index, 3);
}

#[test]
fn unknown_status_defaults_to_pending() {
    assert!(lenient(json!({"status_": "DONE"})).is_pending());
}

#[test]
fn terminal_status_is_replayed_with_log_line() {
    let job = lenient(json!({
        "id_": 2, "status_": "ERROR", "error_": "quota exceeded",
        "logs_": [{"date": "2026-01-30T08:14:09Z", "message": "started"}],
    }));
    assert!(job.is_error());
    assert_eq!(job.error_message(), "quota exceeded");
    assert_eq!(messages(&job), vec!["started", "error: quota exceeded"]);
    assert!(!job.auto_run(), "replay consumes the auto-run permit");
}

#[test]
fn pending_status_adds_no_log_lines() {
    let job = lenient(json!({"status_": "PENDING"}));
    assert!(job.logs().is_empty());
}

#[test]
fn well_formed_logs_get_real_timestamps() {
    let job = lenient(json!({
        "logs_": [{"date": "2026-01-30T08:14:09.250Z", "message": "hello"}],
    }));
    match &job.logs()[0] {
        LogEntry::Entry { date, message } => {
            assert_eq!(message, "hello");
            assert_eq!(date.timestamp_millis(), 1_769_760_849_250);
        }
        other => panic!("expected typed entry, got {:?}", other),
    }
}

#[parameterized(
    missing_date = { json!({"message": "no date"}) },
    missing_message = { json!({"date": "2026-01-30T08:14:09Z"}) },
    bad_date = { json!({"date": "yesterday", "message": "x"}) },
    numeric_message = { json!({"date": "2026-01-30T08:14:09Z", "message": 5}) },
    plain_string = { json!("legacy line") },
)]
fn malformed_logs_pass_through(entry: Value) {
    let job = lenient(json!({"logs_": [entry.clone()]}));
    assert_eq!(job.logs(), &[LogEntry::Raw(entry)]);
}

#[test]
fn children_keep_order_and_variant() {
    let job = lenient(json!({
        "id_": 1,
        "jobs_": [
            {"id_": 3, "index_": 0, "jobType_": "AudienceUpdateJob", "audienceId_": "77"},
            {"id_": 2, "index_": 1, "status_": "COMPLETE"},
        ],
    }));
    let ids: Vec<i64> = job.jobs().iter().map(|child| child.id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(job.jobs()[0].job_type(), "AudienceUpdateJob");
    assert!(job.jobs()[1].is_complete());
}

#[test]
fn create_job_params_are_read() {
    let job = lenient(json!({
        "id_": 4, "jobType_": "AudienceCreateJob", "status_": "RUNNING",
        "audienceName_": "Buyers", "description_": "d", "lifespan_": 30,
        "floodlightId_": "123", "isShared_": true,
        "relationship_": "OR",
        "rules_": [
            {"variable_": "u1", "operator_": "EQUALS", "value_": "a"},
            {"rules_": [{"variable_": "u2", "operator_": "NOT_EQUALS", "value_": "b"}]},
        ],
    }));

    let JobKind::AudienceCreate(params) = &job.kind else {
        panic!("expected create job, got {:?}", job.kind);
    };
    assert_eq!(params.name, "Buyers");
    assert_eq!(params.description, "d");
    assert_eq!(params.lifespan, 30);
    assert_eq!(params.floodlight_id, "123");
    assert!(params.shared);
    let rules = params.rules.as_ref().unwrap();
    assert_eq!(rules.relationship, Relationship::Or);
    assert_eq!(rules.term_count(), 2);
    let Rule::Group(nested) = &rules.rules[1] else { panic!("expected nested group") };
    assert_eq!(nested.relationship, Relationship::And);
    assert!(job.is_running());
}

#[test]
fn empty_rule_list_attaches_no_rules() {
    let job = lenient(json!({
        "jobType_": "AudienceCreateJob", "audienceName_": "a", "relationship_": "OR", "rules_": [],
    }));
    let JobKind::AudienceCreate(params) = &job.kind else { panic!("expected create job") };
    assert_eq!(params.rules, None);
}

#[test]
fn rules_without_relationship_default_to_and() {
    let job = lenient(json!({
        "jobType_": "AudienceCreateJob",
        "rules_": [{"variable_": "u1", "operator_": "EQUALS", "value_": "a"}],
    }));
    let JobKind::AudienceCreate(params) = &job.kind else { panic!("expected create job") };
    assert_eq!(params.rules.as_ref().unwrap().relationship, Relationship::And);
}

#[test]
fn incomplete_variant_is_deferred_in_lenient_mode() {
    let job = lenient(json!({"id_": 9, "jobType_": "AudienceCreateJob", "status_": "ERROR", "error_": "x"}));
    let JobKind::AudienceCreate(params) = &job.kind else { panic!("expected create job") };
    assert_eq!(params.name, "");
    assert!(job.is_error(), "status replays from the base error");
    assert_eq!(job.error_message(), "x");
}

#[test]
fn strict_mode_rejects_missing_fields() {
    let value = json!({"id_": 9, "jobType_": "AudienceUpdateJob"});
    let err = reconstruct(&value, &FakeClock::new(), ReconstructOptions::strict()).unwrap_err();
    assert!(matches!(err, WireError::MissingField { job_id: 9, field: "audienceId" }));
}

#[test]
fn strict_mode_rejects_unknown_operator() {
    let value = json!({
        "id_": 3, "jobType_": "AudienceCreateJob", "audienceName_": "a", "floodlightId_": "1",
        "rules_": [{"variable_": "u1", "operator_": "LIKE", "value_": "a"}],
    });
    let err = reconstruct(&value, &FakeClock::new(), ReconstructOptions::strict()).unwrap_err();
    assert!(matches!(err, WireError::InvalidField { job_id: 3, field: "operator_", .. }));
}

#[test]
fn strict_mode_checks_children() {
    let value = json!({"id_": 1, "jobs_": [{"id_": 2, "jobType_": "AudienceCreateJob"}]});
    let err = reconstruct(&value, &FakeClock::new(), ReconstructOptions::strict()).unwrap_err();
    assert!(matches!(err, WireError::MissingField { job_id: 2, field: "audienceName" }));
}

#[test]
fn from_json_str_reports_parse_errors() {
    let err =
        from_json_str("{not json", &FakeClock::new(), ReconstructOptions::default()).unwrap_err();
    assert!(matches!(err, WireError::Parse(_)));
}

#[test]
fn completed_after_error_round_trips_without_stale_message() {
    let clock = FakeClock::new();
    let mut job = Job::new(2, 0);
    job.error("quota exceeded", &clock);
    job.complete(&clock);

    let encoded = crate::encode(&job);
    let rebuilt = reconstruct(&encoded, &clock, ReconstructOptions::default()).unwrap();

    assert_eq!(encoded["error_"], "");
    assert!(rebuilt.is_complete());
    assert_eq!(rebuilt.error_message(), job.error_message());
}
