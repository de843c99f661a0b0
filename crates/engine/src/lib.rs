// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj-engine: bounded dispatch of job operations and the runner that drives
//! batches to completion

pub mod backend;
pub mod dispatch;
pub mod env;
pub mod invoker;
pub mod log_store;
pub mod operations;
pub mod registry;
pub mod runner;

pub use backend::{AudienceBackend, BackendError, DryRunBackend};
#[cfg(any(test, feature = "test-support"))]
pub use backend::{BackendCall, FakeBackend};
pub use dispatch::{DispatchConfig, DispatchError, Dispatcher, InvokeFailure};
pub use invoker::{InvokeError, Invoker, LocalInvoker};
pub use log_store::{
    write_logs, FileLogStore, LogRange, LogStore, LogStoreError, MemoryLogStore,
};
pub use registry::{OperationContext, OperationError, OperationFn, OperationRegistry};
pub use runner::{BatchFailure, JobFailure, RunError, Runner, RunnerConfig};
