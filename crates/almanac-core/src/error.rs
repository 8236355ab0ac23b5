//! Error types for the almanac library.

use std::path::PathBuf;

use thiserror::Error;

use crate::wizard::WizardStep;

/// Comprehensive error type for all schedule operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Device not found for the given ID
    #[error("Device with ID {id} not found")]
    DeviceNotFound { id: u64 },
    /// Gateway not found for the given ID
    #[error("Gateway with ID {id} not found")]
    GatewayNotFound { id: u64 },
    /// Job not found for the given ID
    #[error("Schedule with ID {id} not found")]
    JobNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A wizard operation was attempted from a step that does not allow it
    #[error("Cannot {operation} while on the {step} step")]
    WrongStep {
        step: WizardStep,
        operation: &'static str,
    },
    /// The draft is missing a field required for submission
    #[error("Schedule is incomplete: {field} has not been selected")]
    IncompleteDraft { field: &'static str },
    /// The remote side refused the schedule
    #[error("Schedule was not saved: {message}")]
    SubmissionRejected { message: String },
    /// The remote side did not answer in time
    #[error("Schedule submission timed out after {seconds}s")]
    SubmissionTimeout { seconds: u64 },
    /// Time zone lookup or civil time arithmetic errors
    #[error("Time error: {message}")]
    Time {
        message: String,
        #[source]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> AlmanacError {
        AlmanacError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> AlmanacError {
        AlmanacError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AlmanacError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a jiff error with a short description of what was attempted.
    pub fn time(message: impl Into<String>, source: jiff::Error) -> Self {
        Self::Time {
            message: message.into(),
            source,
        }
    }

    /// Whether the error leaves the wizard draft intact for another attempt.
    ///
    /// Submission failures are reported to the user on the summary step and
    /// the draft is kept; everything else is an input or storage problem.
    pub fn is_retryable_submission(&self) -> bool {
        matches!(
            self,
            Self::SubmissionRejected { .. } | Self::SubmissionTimeout { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AlmanacError::database(message).with_source(e))
    }
}

/// Extension trait for jiff Results.
pub trait TimeResultExt<T> {
    /// Map jiff errors with a message.
    fn time_context(self, message: &str) -> Result<T>;
}

impl<T> TimeResultExt<T> for std::result::Result<T, jiff::Error> {
    fn time_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AlmanacError::time(message, e))
    }
}

/// Result type alias for almanac operations
pub type Result<T> = std::result::Result<T, AlmanacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let error = AlmanacError::invalid_input("offset").with_reason("out of range");
        assert_eq!(
            error.to_string(),
            "Invalid input for field 'offset': out of range"
        );
    }

    #[test]
    fn test_wrong_step_message() {
        let error = AlmanacError::WrongStep {
            step: WizardStep::Days,
            operation: "select a device",
        };
        assert_eq!(error.to_string(), "Cannot select a device while on the days step");
    }

    #[test]
    fn test_retryable_submission() {
        assert!(AlmanacError::SubmissionTimeout { seconds: 5 }.is_retryable_submission());
        assert!(AlmanacError::SubmissionRejected {
            message: "nope".to_string()
        }
        .is_retryable_submission());
        assert!(!AlmanacError::IncompleteDraft { field: "device" }.is_retryable_submission());
    }
}
