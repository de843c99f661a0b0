// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aj run` specs: batches driven to completion.

use crate::prelude::*;

#[test]
fn run_create_audiences_completes_batch() {
    let temp = Project::empty();
    let fixture = temp.file("audiences.json", AUDIENCES);

    temp.aj()
        .args(&["run", "createAudiences", "--backend", fixture.to_str().unwrap()])
        .passes()
        .stdout_has("job 1 complete (Job)")
        .stdout_has("  job 2 complete (AudienceCreateJob)")
        .stdout_has("  job 3 complete (AudienceCreateJob)");

    let sheet = temp.log_sheet("Logs");
    assert!(sheet.contains("[job 2] created audience Buyers (dry-run-1)"), "{}", sheet);
}

#[test]
fn run_reports_failed_children_and_exits_one() {
    let temp = Project::empty();
    let fixture = temp.file("audiences.json", AUDIENCES);

    let out = temp
        .aj()
        .args(&["run", "updateAudiences", "--backend", fixture.to_str().unwrap(), "-o", "json"])
        .fails_with(1);

    let value = out.json();
    assert_eq!(value["jobs"][0]["status_"], "COMPLETE");
    assert_eq!(value["jobs"][0]["jobs_"][0]["status_"], "COMPLETE");
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(value["errors"][0]["jobId"], 3);
    assert_eq!(value["errors"][0]["operationName"], "updateAudiences");
    out.stderr_has("1 job(s) failed");
}

#[test]
fn run_with_nothing_to_do_completes() {
    let temp = Project::empty();
    temp.aj().args(&["run", "updateAllAudiences"]).passes().stdout_has("job 1 complete (Job)");
}

#[test]
fn run_accepts_initial_jobs_file() {
    let temp = Project::empty();
    let jobs = temp.file(
        "jobs.json",
        r#"[{"id_": 1, "jobs_": [{"id_": 2, "status_": "ERROR", "error_": "quota exceeded"}, {"id_": 3, "status_": "COMPLETE"}], "status_": "COMPLETE"}]"#,
    );

    let out = temp
        .aj()
        .args(&["run", "updateAudience", "--jobs", jobs.to_str().unwrap(), "-o", "json"])
        .fails_with(1);

    assert_eq!(
        out.json()["errors"],
        json!([{"jobId": 2, "operationName": "updateAudience", "errorMessage": "quota exceeded"}])
    );
}

#[test]
fn run_unknown_operation_is_usage_error() {
    cli().args(&["run", "deleteAudience"]).fails_with(2).stderr_has("unknown operation: deleteAudience");
}

#[test]
fn run_bad_fixture_is_usage_error() {
    let temp = Project::empty();
    let fixture = temp.file("broken.json", "[1, 2]");
    temp.aj()
        .args(&["run", "createAudiences", "--backend", fixture.to_str().unwrap()])
        .fails_with(2)
        .stderr_has("broken.json");
}

#[test]
fn run_tiny_budget_still_finishes_over_several_rounds() {
    let temp = Project::empty();
    let fixture = temp.file("audiences.json", AUDIENCES);
    temp.aj()
        .args(&["run", "createAudiences", "--backend", fixture.to_str().unwrap(), "--budget-ms", "0"])
        .passes()
        .stdout_has("job 1 complete (Job)");
}

#[test]
fn clear_logs_empties_sheet_range() {
    let temp = Project::empty();
    std::fs::create_dir_all(temp.path().join("logs")).unwrap();
    temp.file("logs/Audit.log", "Header\nold row\n");

    temp.aj().args(&["run", "clearLogs", "--sheet", "Audit", "--start-row", "2"]).passes();

    let sheet = temp.log_sheet("Audit");
    assert!(sheet.starts_with("Header\n"), "{}", sheet);
    assert!(!sheet.contains("old row"), "{}", sheet);
}
