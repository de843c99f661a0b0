// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aj: drive resumable audience batch jobs from the command line

mod color;
mod commands;
mod engine_args;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "aj",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("AJ_BUILD_REVISION"), ")"),
    about = "Resumable audience batch jobs",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an operation over a batch until every job finishes
    Run(commands::run::RunArgs),
    /// Perform a single bounded invocation
    Invoke(commands::invoke::InvokeArgs),
    /// List registered operations
    Operations,
}

/// Log to stderr, filtered by `AJ_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("AJ_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    match cli.command {
        Some(Commands::Run(args)) => commands::run::handle(args, format).await,
        Some(Commands::Invoke(args)) => commands::invoke::handle(args, format).await,
        Some(Commands::Operations) => commands::operations::handle(format),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if let Some(exit) = e.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("Error: {}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
