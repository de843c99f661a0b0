// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.

use std::path::{Path, PathBuf};

pub use serde_json::{json, Value};

/// `aj` with color and noisy logging turned off.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("aj").unwrap();
    cmd.env("NO_COLOR", "1").env("AJ_LOG", "warn");
    for key in [
        "AJ_INVOCATION_BUDGET_MS",
        "AJ_MAX_ROUNDS",
        "AJ_LOG_DIR",
        "AJ_LOG_SHEET",
        "AJ_LOG_START_ROW",
        "AJ_STRICT_RECONSTRUCT",
    ] {
        cmd.env_remove(key);
    }
    Cli { cmd }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert_eq!(out.code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }

    /// Run and require the given non-zero exit code.
    pub fn fails_with(mut self, code: i32) -> RunOutput {
        let output = self.cmd.output().unwrap();
        let out = RunOutput::from(output);
        assert_eq!(out.code, Some(code), "unexpected exit\nstdout:\n{}\nstderr:\n{}", out.stdout, out.stderr);
        out
    }
}

pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunOutput {
    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "stdout missing {:?}:\n{}", needle, self.stdout);
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "stderr missing {:?}:\n{}", needle, self.stderr);
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// Scratch directory for fixtures and log sheets.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn log_sheet(&self, sheet: &str) -> String {
        std::fs::read_to_string(self.dir.path().join("logs").join(format!("{}.log", sheet)))
            .unwrap_or_default()
    }

    /// `aj` running inside the project with its log directory.
    pub fn aj(&self) -> Cli {
        cli().current_dir(self.path()).env("AJ_LOG_DIR", self.path().join("logs"))
    }
}

pub const AUDIENCES: &str = r#"{
    "createRequests": [
        {"name": "Buyers", "floodlightId": "42", "lifespan": 30,
         "rules": [{"variable": "u1", "operator": "EQUALS", "value": "shoes"}]},
        {"name": "Browsers", "floodlightId": "42"}
    ],
    "updateRequests": [
        {"audienceId": "900", "name": "Renamed", "changedAttributes": ["name"]},
        {"audienceId": ""}
    ]
}"#;
