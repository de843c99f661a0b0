// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod invoke;
pub mod operations;
pub mod run;

use anyhow::Result;
use std::io::Read;

/// Use `value` if given, otherwise read all of stdin.
pub(crate) fn arg_or_stdin(value: Option<String>) -> Result<String> {
    match value {
        Some(s) => Ok(s),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
