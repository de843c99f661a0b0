// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use aj_core::{Clock, Job, JobStatus};

/// Drive a freshly reconstructed job into its wire status.
///
/// Goes through the regular transitions so the usual log lines are written;
/// a `Pending` status replays nothing. Only jobs still holding their
/// auto-run permit are touched: returns `false` for anything else.
pub fn replay_status(job: &mut Job, status: JobStatus, error: &str, clock: &impl Clock) -> bool {
    if !job.take_auto_run() {
        return false;
    }
    match status {
        JobStatus::Pending => {}
        JobStatus::Running => job.run(clock),
        JobStatus::Complete => job.complete(clock),
        JobStatus::Error => job.error(error, clock),
    }
    true
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
