use crate::schema::types::field::{FieldCommon, NumberRules};

/// Numeric input with an optional range constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    pub inner: FieldCommon,
    pub rules: Option<NumberRules>,
}

impl NumberField {
    #[must_use]
    pub fn new(inner: FieldCommon) -> Self {
        Self { inner, rules: None }
    }

    pub fn with_rules(mut self, rules: NumberRules) -> Self {
        self.rules = Some(rules);
        self
    }
}

crate::impl_field!(NumberField);
