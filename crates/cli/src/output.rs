// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use aj_core::Job;
use aj_engine::JobFailure;
use clap::ValueEnum;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line per job, children indented under their parent.
///
/// Format: `job 2 error (AudienceUpdateJob): quota exceeded`
pub fn format_job_tree(job: &Job) -> Vec<String> {
    fn walk(job: &Job, depth: usize, lines: &mut Vec<String>) {
        let mut line = format!(
            "{}job {} {} {}",
            "  ".repeat(depth),
            job.id,
            color::status(job.status()),
            color::muted(&format!("({})", job.job_type()))
        );
        if job.is_error() {
            line.push_str(": ");
            line.push_str(job.error_message());
        }
        lines.push(line);
        for child in job.jobs() {
            walk(child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    walk(job, 0, &mut lines);
    lines
}

/// JSON document for a finished batch: encoded jobs plus failures.
pub fn batch_json(jobs: &[Job], errors: &[JobFailure]) -> serde_json::Value {
    serde_json::json!({
        "jobs": jobs.iter().map(aj_wire::encode).collect::<Vec<_>>(),
        "errors": errors,
    })
}

/// Print a finished batch to stdout.
pub fn print_batch(jobs: &[Job], errors: &[JobFailure], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for job in jobs {
                for line in format_job_tree(job) {
                    println!("{}", line);
                }
            }
            if !errors.is_empty() {
                println!();
                println!("{}", color::header(&format!("{} failed:", errors.len())));
                for failure in errors {
                    println!("  {}", failure);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&batch_json(jobs, errors))?);
        }
    }
    Ok(())
}
