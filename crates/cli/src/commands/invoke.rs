// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `aj invoke`: one bounded invocation, payload in and payload out

use aj_core::SystemClock;
use aj_engine::{InvokeError, Invoker, LocalInvoker};
use aj_wire::{from_json_str, ReconstructOptions};
use anyhow::Result;
use clap::Args;

use crate::engine_args::EngineArgs;
use crate::exit_error::ExitError;
use crate::output::{format_job_tree, OutputFormat};

#[derive(Args, Debug)]
pub struct InvokeArgs {
    /// Operation name
    pub operation: String,

    /// Job tree as wire JSON. If omitted, reads from stdin
    #[arg(value_name = "JSON")]
    pub payload: Option<String>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

pub async fn handle(args: InvokeArgs, format: OutputFormat) -> Result<()> {
    let payload = super::arg_or_stdin(args.payload)?;
    let log_store = args.engine.log_store();
    let invoker = LocalInvoker::new(args.engine.dispatcher(log_store)?);

    match invoker.invoke(&args.operation, payload).await {
        Ok(returned) => print_payload(&returned, format),
        Err(InvokeError::Failed { operation, payload }) => {
            print_payload(&payload, format)?;
            Err(ExitError::failed(format!("{} invocation failed", operation)).into())
        }
        Err(e @ InvokeError::Transport(_)) => Err(e.into()),
    }
}

/// Raw payload for JSON output; the decoded tree for text.
fn print_payload(payload: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", payload),
        OutputFormat::Text => {
            let job = from_json_str(payload, &SystemClock, ReconstructOptions::default())?;
            for line in format_job_tree(&job) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
