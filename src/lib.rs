//! # FormFold Library
//!
//! This library implements a schema engine for dynamic forms. Administrators
//! define forms as trees of typed fields, where choice fields can reveal
//! additional nested fields depending on the selected option, and respondent
//! submissions are validated and sanitized against that schema.
//!
//! ## Core Components
//!
//! * `schema` - Field tree model, normalization, invariant checks, ordering,
//!   and tree locate/mutate primitives
//! * `form` - Form records, the canonicalization pipeline, and the in-memory
//!   form registry
//! * `submission` - Submission records and the answer validator
//! * `error` - Unified error types and handling
//!
//! ## Architecture
//!
//! Raw field definitions (from a builder UI or a stored document) pass
//! through the normalizer and the invariant checks to become a canonical
//! tree, which is safe to persist verbatim. On submission, the canonical
//! tree and the raw answer map are walked together: each answer is coerced
//! and validated per field type, and nested fields are visited only along
//! the branches the respondent actually selected.

pub mod constants;
pub mod error;
pub mod form;
pub mod schema;
pub mod submission;

// Re-export main types for convenience
pub use error::{FormFoldError, FormFoldResult};
pub use form::manager::FormManager;
pub use form::operations::{prepare_field, prepare_fields};
pub use form::types::{Form, FormUpdate};
pub use schema::types::{
    Field, FieldOption, FieldType, FieldVariant, JsonField, JsonFieldOption, SchemaError,
    SubmissionError, ValidationRules,
};
pub use submission::types::{Submission, SubmissionMeta, SubmissionPage};
pub use submission::validator::validate_submission;
