//! JSON output types for machine-readable CLI output.
//!
//! Emitted by `validate --json` and `generate --json` so scripts can parse
//! results without scraping colored text.

use noisekit_spec::{JobError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Stable error codes for CLI operations.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Job parsed but failed validation
    pub const INVALID_JOB: &str = "CLI_006";
    /// Generation error (wraps backend errors)
    pub const GENERATION_ERROR: &str = "CLI_010";
    /// Output could not be written
    pub const WRITE_ERROR: &str = "CLI_011";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_006")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Dotted path to the offending field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the field path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// One error per failed constraint.
pub fn validation_errors_to_json(errors: &ValidationErrors) -> Vec<JsonError> {
    errors
        .errors
        .iter()
        .map(|e| JsonError::new(error_codes::INVALID_JOB, &e.constraint).with_path(&e.field))
        .collect()
}

/// Converts a job loading failure into JSON errors.
pub fn job_error_to_json(error: &JobError, file: &str) -> Vec<JsonError> {
    match error {
        JobError::Io(e) => {
            vec![JsonError::new(error_codes::FILE_READ, e.to_string()).with_file(file)]
        }
        JobError::JsonParse(e) => {
            vec![JsonError::new(error_codes::JSON_PARSE, e.to_string()).with_file(file)]
        }
        JobError::Invalid(errors) => validation_errors_to_json(errors)
            .into_iter()
            .map(|e| e.with_file(file))
            .collect(),
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the job is valid
    pub success: bool,
    /// Errors found
    pub errors: Vec<JsonError>,
    /// Job summary (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JobSummary>,
}

impl ValidateOutput {
    /// Creates a successful validate output.
    pub fn success(summary: JobSummary) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(summary),
        }
    }

    /// Creates a failed validate output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Key facts about a valid job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobSummary {
    /// Job name
    pub name: String,
    /// "noise" or "sprite"
    pub kind: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Number of frames (1 without animation)
    pub frame_count: u32,
    /// BLAKE3 hash of the job file
    pub source_hash: String,
}

/// One file written by `generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputRecord {
    /// Path of the written file
    pub path: String,
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
    /// BLAKE3 hash of the PNG bytes
    pub hash: String,
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Files written, in order
    pub outputs: Vec<OutputRecord>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(outputs: Vec<OutputRecord>, duration_ms: u64) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            outputs,
            duration_ms,
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>, duration_ms: u64) -> Self {
        Self {
            success: false,
            errors,
            outputs: Vec::new(),
            duration_ms,
        }
    }
}
