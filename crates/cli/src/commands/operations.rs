// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use aj_engine::OperationRegistry;
use anyhow::Result;

use crate::output::OutputFormat;

pub fn handle(format: OutputFormat) -> Result<()> {
    let registry = OperationRegistry::global();
    let names: Vec<&str> = registry.names().collect();
    match format {
        OutputFormat::Text => {
            for name in names {
                println!("{}", name);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
    }
    Ok(())
}
