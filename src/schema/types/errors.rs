use thiserror::Error;

/// Fatal schema-authoring faults.
///
/// These always indicate a caller or authoring mistake. They abort the whole
/// operation: a tree that fails any of these checks is never committed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Duplicate field name detected: {0}")]
    DuplicateFieldName(String),

    #[error("Field \"{0}\" already exists in the form")]
    AlreadyExists(String),

    #[error("Field \"{0}\" requires at least one option")]
    MissingOptions(String),

    #[error("Invalid regex on field \"{field}\": {message}")]
    InvalidRegex { field: String, message: String },

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Field nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },

    #[error("Field tree exceeds the maximum of {max} fields")]
    TreeTooLarge { max: usize },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl SchemaError {
    /// Stable machine-readable kind, for the boundary layer to map onto its
    /// own status codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateFieldName(_) | Self::AlreadyExists(_) => "duplicate_name",
            Self::MissingOptions(_) => "missing_options",
            Self::InvalidRegex { .. } => "invalid_regex",
            Self::InvalidField(_) => "invalid_field",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
            Self::TreeTooLarge { .. } => "tree_too_large",
            Self::NotFound(_) => "not_found",
        }
    }
}

/// Faults in a respondent's submitted answers.
///
/// Reported with the offending field name so the client can correct and
/// resubmit. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("Field \"{0}\" is required")]
    MissingRequiredField(String),

    #[error("Field \"{field}\" expects {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("Field \"{0}\" must be a valid email")]
    InvalidEmail(String),

    #[error("Field \"{field}\" {message}")]
    OutOfRange { field: String, message: String },

    #[error("Field \"{0}\" does not match the required pattern")]
    PatternMismatch(String),

    #[error("Field \"{0}\" received an unknown option")]
    UnknownOption(String),
}

impl SubmissionError {
    /// Stable machine-readable kind, for the boundary layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::InvalidType { .. } => "invalid_type",
            Self::InvalidEmail(_) | Self::PatternMismatch(_) => "pattern_mismatch",
            Self::OutOfRange { .. } => "out_of_range",
            Self::UnknownOption(_) => "unknown_option",
        }
    }
}
