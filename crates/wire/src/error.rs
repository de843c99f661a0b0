// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid job JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Only raised by strict reconstruction.
    #[error("job {job_id}: missing required field {field}")]
    MissingField { job_id: i64, field: &'static str },

    /// Only raised by strict reconstruction.
    #[error("job {job_id}: invalid {field}: {reason}")]
    InvalidField { job_id: i64, field: &'static str, reason: String },
}
