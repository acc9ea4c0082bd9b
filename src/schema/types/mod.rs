pub mod errors;
pub mod field;
pub mod json;

// Re-export all types at the schema::types module level
pub use errors::{SchemaError, SubmissionError};
pub use field::{
    CheckboxField, ChoiceField, DateField, Field, FieldCommon, FieldOption, FieldType,
    FieldVariant, NumberField, NumberRules, TextField, TextRules, ValidationRules,
};
pub use json::{JsonField, JsonFieldOption};
