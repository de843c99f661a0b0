// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named operations and the context they run in.
//!
//! The registry is built once and never mutated; dispatch only looks names
//! up in it.

use crate::backend::{AudienceBackend, BackendError};
use crate::log_store::{LogStore, LogStoreError};
use crate::operations;
use aj_core::{Clock, Job, SystemClock};
use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors raised by an operation body
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("job {job_id} is missing required parameter {field}")]
    MissingParameters { job_id: i64, field: &'static str },
    #[error("{operation} expected {expected}, got {found}")]
    WrongJobType { operation: &'static str, expected: &'static str, found: &'static str },
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    LogStore(#[from] LogStoreError),
}

/// Everything an operation may touch besides the job itself.
pub struct OperationContext<'a, C: Clock> {
    pub clock: &'a C,
    /// Point after which batch operations stop starting new children
    pub deadline: Instant,
    pub backend: &'a dyn AudienceBackend,
    pub log_store: &'a dyn LogStore,
    /// Name the operation was invoked under
    pub operation: &'static str,
}

impl<C: Clock> OperationContext<'_, C> {
    pub fn time_remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(self.clock.now())
    }

    pub fn out_of_time(&self) -> bool {
        self.clock.now() >= self.deadline
    }
}

pub type OperationFn<C> = fn(&OperationContext<'_, C>, &mut Job) -> Result<(), OperationError>;

/// Operation name → body, in registration order.
pub struct OperationRegistry<C: Clock> {
    operations: IndexMap<&'static str, OperationFn<C>>,
}

impl<C: Clock> OperationRegistry<C> {
    pub fn empty() -> Self {
        Self { operations: IndexMap::new() }
    }

    /// Registry holding every built-in operation.
    pub fn standard() -> Self {
        Self::empty()
            .with(operations::CREATE_AUDIENCES, operations::create_audiences)
            .with(operations::CREATE_AUDIENCE, operations::create_audience)
            .with(operations::UPDATE_AUDIENCES, operations::update_audiences)
            .with(operations::UPDATE_AUDIENCE, operations::update_audience)
            .with(operations::UPDATE_ALL_AUDIENCES, operations::update_all_audiences)
            .with(operations::CLEAR_LOGS, operations::clear_logs)
            .with(operations::WRITE_LOGS, operations::write_logs)
    }

    /// Add or replace an operation.
    pub fn with(mut self, name: &'static str, operation: OperationFn<C>) -> Self {
        self.operations.insert(name, operation);
        self
    }

    /// Look up an operation, returning its canonical name with it.
    pub fn get(&self, name: &str) -> Option<(&'static str, OperationFn<C>)> {
        self.operations.get_key_value(name).map(|(name, operation)| (*name, *operation))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }
}

static GLOBAL: OnceLock<Arc<OperationRegistry<SystemClock>>> = OnceLock::new();

impl OperationRegistry<SystemClock> {
    /// Process-wide standard registry, built on first use.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::standard())))
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
