// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded dispatch entry point.
//!
//! One invocation takes an operation name and a serialized job tree,
//! reconstructs the tree, runs the operation until it finishes or the
//! invocation budget runs out, and hands the tree back serialized. No
//! failure escapes as anything but an errored job: the caller always gets a
//! payload it can decode.

use crate::backend::AudienceBackend;
use crate::log_store::LogStore;
use crate::registry::{OperationContext, OperationError, OperationRegistry};
use aj_core::{Clock, Job};
use aj_wire::{encode, reconstruct, ReconstructOptions, WireError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid job payload: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid job: {0}")]
    Reconstruct(#[source] WireError),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: OperationError,
    },
    #[error("{operation} panicked: {message}")]
    Panicked { operation: &'static str, message: String },
}

/// A failed invocation: the error plus the errored job, encoded.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct InvokeFailure {
    pub error: DispatchError,
    pub payload: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Wall-clock budget for one invocation
    pub budget: Duration,
    /// Reject incomplete variant jobs before any operation runs
    pub strict: bool,
}

impl DispatchConfig {
    pub fn from_env() -> Self {
        Self { budget: crate::env::invocation_budget(), strict: crate::env::strict_reconstruct() }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { budget: Duration::from_secs(270), strict: false }
    }
}

/// Stateless operation dispatcher.
pub struct Dispatcher<C: Clock> {
    registry: Arc<OperationRegistry<C>>,
    backend: Arc<dyn AudienceBackend>,
    log_store: Arc<dyn LogStore>,
    clock: C,
    config: DispatchConfig,
}

impl<C: Clock> Dispatcher<C> {
    pub fn new(
        registry: Arc<OperationRegistry<C>>,
        backend: Arc<dyn AudienceBackend>,
        log_store: Arc<dyn LogStore>,
        clock: C,
        config: DispatchConfig,
    ) -> Self {
        Self { registry, backend, log_store, clock, config }
    }

    pub fn registry(&self) -> &OperationRegistry<C> {
        &self.registry
    }

    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Run `operation` on the job encoded in `payload`.
    pub fn invoke(&self, operation: &str, payload: &str) -> Result<String, InvokeFailure> {
        let started = self.clock.now();
        let deadline = started + self.config.budget;

        let value: serde_json::Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(e) => return Err(self.fail(operation, Job::new(0, 0), DispatchError::Parse(e))),
        };

        let options = ReconstructOptions { strict: self.config.strict };
        let mut job = match reconstruct(&value, &self.clock, options) {
            Ok(job) => job,
            Err(e) => {
                // Lenient decoding cannot fail; it recovers a tree to mark as errored.
                let job = reconstruct(&value, &self.clock, ReconstructOptions::default())
                    .unwrap_or_else(|_| Job::new(0, 0));
                return Err(self.fail(operation, job, DispatchError::Reconstruct(e)));
            }
        };

        let Some((name, body)) = self.registry.get(operation) else {
            return Err(self.fail(operation, job, DispatchError::UnknownOperation(operation.into())));
        };

        let ctx = OperationContext {
            clock: &self.clock,
            deadline,
            backend: self.backend.as_ref(),
            log_store: self.log_store.as_ref(),
            operation: name,
        };
        // A panicking operation leaves the tree as far as it got; that tree
        // is what gets errored and handed back.
        match panic::catch_unwind(AssertUnwindSafe(|| body(&ctx, &mut job))) {
            Ok(Ok(())) => {}
            Ok(Err(source)) => {
                let error = DispatchError::Operation { operation: name, source };
                return Err(self.fail(operation, job, error));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                let error = DispatchError::Panicked { operation: name, message };
                return Err(self.fail(operation, job, error));
            }
        }

        let elapsed = self.clock.now().saturating_duration_since(started);
        tracing::info!(
            operation = name,
            job_id = job.id,
            status = %job.status(),
            elapsed_ms = elapsed.as_millis() as u64,
            "invocation finished"
        );
        Ok(encode(&job).to_string())
    }

    fn fail(&self, operation: &str, mut job: Job, error: DispatchError) -> InvokeFailure {
        tracing::warn!(operation, job_id = job.id, error = %error, "invocation failed");
        job.error(error.to_string(), &self.clock);
        InvokeFailure { error, payload: encode(&job).to_string() }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
