use crate::schema::types::{SchemaError, SubmissionError};
use std::fmt;

/// Unified error type for the entire crate.
///
/// Each variant represents a category of failures, with enough context for
/// the boundary layer to map it onto its own status codes. This crate never
/// knows about transport status codes itself.
#[derive(Debug, Clone)]
pub enum FormFoldError {
    /// Errors related to schema authoring and structural operations
    Schema(SchemaError),

    /// Errors caused by a respondent's submitted answers
    Submission(SubmissionError),

    /// Errors related to serialization/deserialization
    Serialization(String),

    /// Other errors that don't fit into the above categories
    Other(String),
}

impl fmt::Display for FormFoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "Schema error: {}", err),
            Self::Submission(err) => write!(f, "Submission error: {}", err),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for FormFoldError {}

/// Conversion from SchemaError to FormFoldError
impl From<SchemaError> for FormFoldError {
    fn from(error: SchemaError) -> Self {
        FormFoldError::Schema(error)
    }
}

/// Conversion from SubmissionError to FormFoldError
impl From<SubmissionError> for FormFoldError {
    fn from(error: SubmissionError) -> Self {
        FormFoldError::Submission(error)
    }
}

/// Conversion from serde_json::Error to FormFoldError
impl From<serde_json::Error> for FormFoldError {
    fn from(error: serde_json::Error) -> Self {
        FormFoldError::Serialization(error.to_string())
    }
}

/// Result type alias for operations that can result in a FormFoldError
pub type FormFoldResult<T> = Result<T, FormFoldError>;
