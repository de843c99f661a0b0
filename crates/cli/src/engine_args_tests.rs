// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn flags_override_environment() {
    std::env::set_var("AJ_INVOCATION_BUDGET_MS", "5000");
    std::env::set_var("AJ_LOG_SHEET", "FromEnv");
    let args = EngineArgs {
        budget_ms: Some(250),
        sheet: Some("FromFlag".to_string()),
        ..EngineArgs::default()
    };

    assert_eq!(args.dispatch_config().budget, Duration::from_millis(250));
    assert_eq!(args.log_range().sheet, "FromFlag");

    std::env::remove_var("AJ_INVOCATION_BUDGET_MS");
    std::env::remove_var("AJ_LOG_SHEET");
}

#[test]
#[serial]
fn environment_fills_unset_flags() {
    std::env::set_var("AJ_INVOCATION_BUDGET_MS", "5000");
    std::env::set_var("AJ_LOG_START_ROW", "4");
    std::env::set_var("AJ_STRICT_RECONSTRUCT", "1");
    let args = EngineArgs::default();

    assert_eq!(args.dispatch_config().budget, Duration::from_millis(5000));
    assert!(args.dispatch_config().strict);
    assert_eq!(args.log_range(), LogRange::new("Logs", 4));

    std::env::remove_var("AJ_INVOCATION_BUDGET_MS");
    std::env::remove_var("AJ_LOG_START_ROW");
    std::env::remove_var("AJ_STRICT_RECONSTRUCT");
}

#[test]
fn missing_fixture_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = EngineArgs { backend: Some(dir.path().join("none.json")), ..EngineArgs::default() };
    let err = args.backend().err().unwrap();
    assert_eq!(err.code, crate::exit_error::EXIT_USAGE);
    assert!(err.message.contains("none.json"));
}
