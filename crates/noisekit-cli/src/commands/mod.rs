//! CLI command implementations.

pub mod generate;
pub mod json_output;
pub mod template;
pub mod validate;

use std::path::Path;

use colored::Colorize;
use noisekit_spec::validation::validate_job;
use noisekit_spec::{Job, JobError, ValidationErrors};

/// A parsed and validated job plus the hash of its source text.
#[derive(Debug)]
pub struct LoadedJob {
    pub job: Job,
    /// BLAKE3 hex digest of the file contents.
    pub source_hash: String,
}

/// Reads, parses, and validates a job file.
pub fn load_job(path: &Path) -> Result<LoadedJob, JobError> {
    let text = std::fs::read_to_string(path)?;
    let source_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
    let job = Job::from_json(&text)?;
    validate_job(&job)?;
    Ok(LoadedJob { job, source_hash })
}

/// Frame count of a job: the animation's, or 1.
pub fn frame_count(job: &Job) -> u32 {
    job.animation.as_ref().map_or(1, |a| a.frame_count)
}

/// Prints one line per failed constraint and a FAILED summary.
pub(crate) fn print_job_errors(errors: &ValidationErrors) {
    for error in &errors.errors {
        println!("  {} {}: {}", "x".red(), error.field.bold(), error.constraint);
    }
    println!(
        "\n{} Job has {} error(s)",
        "FAILED".red().bold(),
        errors.errors.len()
    );
}
