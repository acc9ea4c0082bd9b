use crate::schema::types::field::variant::FieldOption;
use crate::schema::types::field::FieldCommon;

/// Single-choice control, rendered as a dropdown (select) or as radio
/// buttons. A canonical tree guarantees at least one option.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceField {
    pub inner: FieldCommon,
    pub options: Vec<FieldOption>,
}

impl ChoiceField {
    #[must_use]
    pub fn new(inner: FieldCommon, options: Vec<FieldOption>) -> Self {
        Self { inner, options }
    }
}

crate::impl_field!(ChoiceField);
