//! Validate command implementation
//!
//! Checks a job file without generating anything.

use anyhow::{Context, Result};
use colored::Colorize;
use noisekit_spec::JobError;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{job_error_to_json, JobSummary, ValidateOutput};
use super::{frame_count, load_job, print_job_errors, LoadedJob};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(spec_path)
    } else {
        run_human(spec_path)
    }
}

fn summary(loaded: &LoadedJob) -> JobSummary {
    let job = &loaded.job;
    JobSummary {
        name: job.name.clone(),
        kind: job.recipe.kind().to_string(),
        width: job.width(),
        height: job.height(),
        frame_count: frame_count(job),
        source_hash: loaded.source_hash.clone(),
    }
}

fn run_human(spec_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), spec_path);

    match load_job(Path::new(spec_path)) {
        Ok(loaded) => {
            let s = summary(&loaded);
            println!(
                "{} {} ({}, {}x{}, {} frame(s))",
                "Job:".dimmed(),
                s.name,
                s.kind,
                s.width,
                s.height,
                s.frame_count
            );
            println!("{} {}", "Source:".dimmed(), &s.source_hash[..16]);
            println!("\n{} Job is valid", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(JobError::Invalid(errors)) => {
            print_job_errors(&errors);
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load job file: {}", spec_path)),
    }
}

fn run_json(spec_path: &str) -> Result<ExitCode> {
    let (output, code) = match load_job(Path::new(spec_path)) {
        Ok(loaded) => (ValidateOutput::success(summary(&loaded)), ExitCode::SUCCESS),
        Err(e) => (
            ValidateOutput::failure(job_error_to_json(&e, spec_path)),
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
