// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine settings shared by the commands that dispatch operations.
//!
//! Flags win over the `AJ_*` environment; anything left unset falls back to
//! the engine defaults.

use aj_core::SystemClock;
use aj_engine::{
    env, AudienceBackend, DispatchConfig, Dispatcher, DryRunBackend, FileLogStore, LogRange,
    LogStore, OperationRegistry,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::exit_error::ExitError;

#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON fixture of pending audience requests for the dry-run backend
    #[arg(long, value_name = "FILE")]
    pub backend: Option<PathBuf>,

    /// Directory holding log sheets [env: AJ_LOG_DIR]
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log sheet name [env: AJ_LOG_SHEET]
    #[arg(long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// First row of the log range, 1-based [env: AJ_LOG_START_ROW]
    #[arg(long, value_name = "ROW")]
    pub start_row: Option<u64>,

    /// Per-invocation budget in milliseconds [env: AJ_INVOCATION_BUDGET_MS]
    #[arg(long, value_name = "MS")]
    pub budget_ms: Option<u64>,

    /// Reject incomplete audience jobs before running [env: AJ_STRICT_RECONSTRUCT]
    #[arg(long)]
    pub strict: bool,
}

impl EngineArgs {
    pub fn dispatch_config(&self) -> DispatchConfig {
        let env_config = DispatchConfig::from_env();
        DispatchConfig {
            budget: self.budget_ms.map(Duration::from_millis).unwrap_or(env_config.budget),
            strict: self.strict || env_config.strict,
        }
    }

    pub fn log_range(&self) -> LogRange {
        let from_env = LogRange::from_env();
        LogRange::new(
            self.sheet.clone().unwrap_or(from_env.sheet),
            self.start_row.unwrap_or(from_env.start_row),
        )
    }

    pub fn log_store(&self) -> Arc<dyn LogStore> {
        let dir = self.log_dir.clone().unwrap_or_else(env::log_dir);
        Arc::new(FileLogStore::new(&dir, &self.log_range()))
    }

    pub fn backend(&self) -> Result<Arc<dyn AudienceBackend>, ExitError> {
        match &self.backend {
            Some(path) => DryRunBackend::load(path)
                .map(|backend| Arc::new(backend) as Arc<dyn AudienceBackend>)
                .map_err(|e| ExitError::usage(format!("{}: {}", path.display(), e))),
            None => Ok(Arc::new(DryRunBackend::empty())),
        }
    }

    pub fn dispatcher(
        &self,
        log_store: Arc<dyn LogStore>,
    ) -> Result<Arc<Dispatcher<SystemClock>>, ExitError> {
        let config = self.dispatch_config();
        tracing::debug!(budget_ms = config.budget.as_millis() as u64, strict = config.strict, "engine config");
        Ok(Arc::new(Dispatcher::new(
            OperationRegistry::global(),
            self.backend()?,
            log_store,
            SystemClock,
            config,
        )))
    }
}

#[cfg(test)]
#[path = "engine_args_tests.rs"]
mod tests;
