// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Seam between the runner and whatever executes one bounded invocation.

use crate::dispatch::Dispatcher;
use aj_core::Clock;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    /// The invocation ran and failed; `payload` is the errored job tree.
    #[error("{operation} invocation failed")]
    Failed { operation: String, payload: String },
    /// The invocation could not be carried out at all.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Executes one bounded invocation and returns the serialized result.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, operation: &str, payload: String) -> Result<String, InvokeError>;
}

/// Invoker running the dispatcher in-process on the blocking pool.
pub struct LocalInvoker<C: Clock + 'static> {
    dispatcher: Arc<Dispatcher<C>>,
}

impl<C: Clock + 'static> LocalInvoker<C> {
    pub fn new(dispatcher: Arc<Dispatcher<C>>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl<C: Clock + 'static> Invoker for LocalInvoker<C> {
    async fn invoke(&self, operation: &str, payload: String) -> Result<String, InvokeError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let name = operation.to_string();
        let result = tokio::task::spawn_blocking(move || dispatcher.invoke(&name, &payload))
            .await
            .map_err(|e| InvokeError::Transport(e.to_string()))?;
        result.map_err(|failure| InvokeError::Failed {
            operation: operation.to_string(),
            payload: failure.payload,
        })
    }
}

#[cfg(test)]
#[path = "invoker_tests.rs"]
mod tests;
