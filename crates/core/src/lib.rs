// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj-core: job tree, state machine and audience parameter model

pub mod macros;

pub mod audience;
pub mod clock;
pub mod job;
pub mod log;
pub mod rule;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use audience::{AudienceCreateParams, AudienceUpdateParams};
pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{
    Job, JobKind, JobStatus, AUDIENCE_CREATE_JOB_TYPE, AUDIENCE_UPDATE_JOB_TYPE, GENERIC_JOB_TYPE,
};
pub use log::LogEntry;
pub use rule::{Operator, Relationship, Rule, RuleGroup, RuleParseError, Term};
