pub mod checkbox_field;
pub mod choice_field;
pub mod common;
pub mod date_field;
pub mod number_field;
pub mod text_field;
pub mod variant;

pub use checkbox_field::CheckboxField;
pub use choice_field::ChoiceField;
pub use common::{Field, FieldCommon, FieldType, NumberRules, TextRules, ValidationRules};
pub use date_field::DateField;
pub use number_field::NumberField;
pub use text_field::TextField;
pub use variant::{FieldOption, FieldVariant};
