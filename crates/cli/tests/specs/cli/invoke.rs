// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aj invoke` specs: one bounded invocation at the wire boundary.

use crate::prelude::*;

#[test]
fn invoke_returns_updated_payload() {
    let temp = Project::empty();
    let out = temp.aj().args(&["invoke", "writeLogs", r#"{"id_": 5}"#, "-o", "json"]).passes();
    let value = out.json();
    assert_eq!(value["id_"], 5);
    assert_eq!(value["status_"], "COMPLETE");
}

#[test]
fn invoke_reads_payload_from_stdin() {
    let temp = Project::empty();
    temp.aj()
        .args(&["invoke", "writeLogs"])
        .stdin(r#"{"id_": 6}"#)
        .passes()
        .stdout_has("job 6 complete (Job)");
}

#[test]
fn invoke_unknown_operation_prints_errored_job() {
    let temp = Project::empty();
    let out = temp.aj().args(&["invoke", "deleteAudience", r#"{"id_": 2}"#, "-o", "json"]).fails_with(1);
    let value = out.json();
    assert_eq!(value["status_"], "ERROR");
    assert_eq!(value["error_"], "unknown operation: deleteAudience");
}

#[test]
fn invoke_bad_json_still_returns_a_job() {
    let temp = Project::empty();
    let out = temp.aj().args(&["invoke", "writeLogs", "{nope", "-o", "json"]).fails_with(1);
    let value = out.json();
    assert_eq!(value["id_"], 0);
    assert_eq!(value["status_"], "ERROR");
}

#[test]
fn invoke_strict_rejects_incomplete_variant() {
    let temp = Project::empty();
    let payload = r#"{"id_": 3, "jobType_": "AudienceCreateJob", "floodlightId_": "42"}"#;
    let out = temp.aj().args(&["invoke", "createAudience", payload, "--strict", "-o", "json"]).fails_with(1);
    let error = out.json()["error_"].as_str().unwrap_or_default().to_string();
    assert!(error.starts_with("invalid job"), "{}", error);
}
