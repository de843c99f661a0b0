// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn aj_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn aj_help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("run").stdout_has("invoke").stdout_has("operations");
}

#[test]
fn aj_run_help_shows_engine_flags() {
    cli().args(&["run", "--help"]).passes().stdout_has("--budget-ms").stdout_has("--max-rounds");
}

#[test]
fn aj_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn operations_lists_every_registered_name() {
    cli()
        .args(&["operations"])
        .passes()
        .stdout_has("createAudiences")
        .stdout_has("updateAllAudiences")
        .stdout_has("clearLogs")
        .stdout_has("writeLogs");
}

#[test]
fn operations_json_is_an_array() {
    let out = cli().args(&["operations", "-o", "json"]).passes();
    assert_eq!(out.json().as_array().map(Vec::len), Some(7));
}
