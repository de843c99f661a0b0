// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;

/// Wall-clock ceiling for one bounded invocation (`AJ_INVOCATION_BUDGET_MS`, default 270s).
///
/// Sits below the host's hard limit so an operation can yield and return
/// its partially finished tree before being killed.
pub fn invocation_budget() -> Duration {
    std::env::var("AJ_INVOCATION_BUDGET_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(270))
}

/// Upper bound on runner rounds for one batch (`AJ_MAX_ROUNDS`, default 1000).
pub fn max_rounds() -> usize {
    std::env::var("AJ_MAX_ROUNDS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1000)
}

/// Directory holding file-backed log sheets (`AJ_LOG_DIR`, default `./logs`).
pub fn log_dir() -> PathBuf {
    std::env::var("AJ_LOG_DIR")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Log sheet name (`AJ_LOG_SHEET`, default `Logs`).
pub fn log_sheet() -> String {
    std::env::var("AJ_LOG_SHEET").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "Logs".into())
}

/// First row of the log range, 1-based (`AJ_LOG_START_ROW`, default 1).
pub fn log_start_row() -> u64 {
    std::env::var("AJ_LOG_START_ROW")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Reject incomplete variant jobs at reconstruction (`AJ_STRICT_RECONSTRUCT=1`).
pub fn strict_reconstruct() -> bool {
    std::env::var("AJ_STRICT_RECONSTRUCT").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
