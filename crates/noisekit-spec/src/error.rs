//! Error types for parameter validation and job document loading.

use thiserror::Error;

/// An invalid parameter combination detected before any generation work.
///
/// Carries the offending field (as a dotted path such as
/// `layer_a.scale` or `animation.layout`) and the violated constraint so a
/// caller can point the user at the exact control to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {constraint}")]
pub struct ConfigurationError {
    /// Path to the problematic field.
    pub field: String,
    /// Human-readable description of the violated constraint.
    pub constraint: String,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Prefixes the field path, e.g. `scale` becomes `layer_a.scale`.
    pub fn nested(mut self, parent: &str) -> Self {
        self.field = format!("{}.{}", parent, self.field);
        self
    }
}

/// All configuration errors found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("validation failed with {} error(s)", .errors.len())]
pub struct ValidationErrors {
    /// Individual failures, in the order they were found.
    pub errors: Vec<ConfigurationError>,
}

impl ValidationErrors {
    /// Creates an empty error collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    pub fn push(&mut self, error: ConfigurationError) {
        self.errors.push(error);
    }

    /// Records every failure from a nested validation, prefixing field paths.
    pub fn extend_nested(&mut self, parent: &str, other: ValidationErrors) {
        self.errors
            .extend(other.errors.into_iter().map(|e| e.nested(parent)));
    }

    /// Returns true when no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into a `Result`, failing when any error was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Returns the first recorded failure, if any.
    pub fn first(&self) -> Option<&ConfigurationError> {
        self.errors.first()
    }
}

impl From<ConfigurationError> for ValidationErrors {
    fn from(error: ConfigurationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Errors from loading a job document.
#[derive(Debug, Error)]
pub enum JobError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document parsed but failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}
