// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job log entries.

use chrono::{DateTime, SecondsFormat, Utc};

/// A single line of job activity.
///
/// Entries rehydrated from the wire that lack a usable date or message are
/// kept as [`LogEntry::Raw`] so nothing is lost on a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Entry { date: DateTime<Utc>, message: String },
    Raw(serde_json::Value),
}

impl LogEntry {
    pub fn new(date: DateTime<Utc>, message: impl Into<String>) -> Self {
        LogEntry::Entry { date, message: message.into() }
    }

    /// Message text, if this is a well-formed entry.
    pub fn message(&self) -> Option<&str> {
        match self {
            LogEntry::Entry { message, .. } => Some(message),
            LogEntry::Raw(_) => None,
        }
    }

    /// Render as a single log store row for the job that produced it.
    ///
    /// Format: `2026-01-30T08:14:09Z [job 2] message`; raw entries have no
    /// timestamp and keep their JSON text.
    pub fn to_row(&self, job_id: i64) -> String {
        match self {
            LogEntry::Entry { date, message } => format!(
                "{} [job {}] {}",
                date.to_rfc3339_opts(SecondsFormat::Secs, true),
                job_id,
                message
            ),
            LogEntry::Raw(value) => format!("- [job {}] {}", job_id, value),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
