use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, WorkoutError>;

/// Error type covering the failure cases of converting workouts between the
/// remote and compact representations, and of the file plumbing around it.
///
/// Conversion errors carry the dotted path of the offending field together
/// with the full node it was found in, so a caller can log the context and
/// decide whether to abort or skip the workout being processed.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when YAML parsing or serialization fails.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Raised when a required field is absent in either representation.
    #[error("missing \"{field}\" at {path}. Full object:\n{node}")]
    MissingField {
        field: String,
        path: String,
        node: Value,
    },

    /// Raised when a field is present but has the wrong shape or range.
    #[error("invalid value at {path}: expected {expected}. Full object:\n{node}")]
    InvalidField {
        path: String,
        expected: String,
        node: Value,
    },

    /// Raised for a sport other than running.
    #[error("sport '{value}' at {path} is not implemented. Full object:\n{node}")]
    UnsupportedSport {
        value: String,
        path: String,
        node: Value,
    },

    /// Raised for a step type key or step discriminator that is not mapped.
    #[error("step type '{value}' at {path} is not implemented. Full object:\n{node}")]
    UnsupportedStepType {
        value: String,
        path: String,
        node: Value,
    },

    /// Raised for an end condition (or comparison) that is not mapped.
    #[error("duration '{value}' at {path} is not implemented. Full object:\n{node}")]
    UnsupportedDuration {
        value: String,
        path: String,
        node: Value,
    },

    /// Raised for a target type key that is not mapped.
    #[error("target '{value}' at {path} is not implemented. Full object:\n{node}")]
    UnsupportedTarget {
        value: String,
        path: String,
        node: Value,
    },

    /// Raised when only one of `pace_from`/`pace_to` is given.
    #[error("missing 'pace_from' or 'pace_to' at {path}. Full object:\n{node}")]
    IncompletePaceRange { path: String, node: Value },

    /// Raised when only one bound of a non-pace range target is given.
    #[error("'{present}' given without '{missing}' at {path}. Full object:\n{node}")]
    IncompleteRange {
        present: String,
        missing: String,
        path: String,
        node: Value,
    },

    /// Raised when a pace, speed, or time string cannot be parsed.
    #[error("invalid value '{value}': {reason}")]
    Format { value: String, reason: String },

    /// Raised when the CLI receives an unsupported conversion request.
    #[error("unsupported conversion from {from:?} to {to:?}")]
    UnsupportedConversion { from: String, to: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl WorkoutError {
    /// Returns `true` for recognised but unimplemented enumeration values.
    ///
    /// Batch callers use this to skip a single workout (for example a cycling
    /// workout in a mixed export) instead of aborting the whole run.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            WorkoutError::UnsupportedSport { .. }
                | WorkoutError::UnsupportedStepType { .. }
                | WorkoutError::UnsupportedDuration { .. }
                | WorkoutError::UnsupportedTarget { .. }
        )
    }

    pub(crate) fn format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        WorkoutError::Format {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
