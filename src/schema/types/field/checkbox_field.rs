use crate::schema::types::field::variant::FieldOption;
use crate::schema::types::field::FieldCommon;

/// Checkbox control. With options it is a multi-select group whose options
/// may reveal nested fields; without options it is a plain boolean toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    pub inner: FieldCommon,
    pub options: Vec<FieldOption>,
}

impl CheckboxField {
    #[must_use]
    pub fn new(inner: FieldCommon, options: Vec<FieldOption>) -> Self {
        Self { inner, options }
    }

    /// Whether this checkbox acts as a multi-select group.
    pub fn is_group(&self) -> bool {
        !self.options.is_empty()
    }
}

crate::impl_field!(CheckboxField);
