use crate::schema::types::field::FieldCommon;

/// Date input. Answers are parsed and normalized to UTC ISO-8601 during
/// submission validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DateField {
    pub inner: FieldCommon,
}

impl DateField {
    #[must_use]
    pub fn new(inner: FieldCommon) -> Self {
        Self { inner }
    }
}

crate::impl_field!(DateField);
