use crate::schema::types::field::{FieldCommon, TextRules};

/// Free-form text input. Covers the single-line, multi-line, and email
/// controls, which share a constraint set of length bounds and an optional
/// pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub inner: FieldCommon,
    pub rules: Option<TextRules>,
}

impl TextField {
    #[must_use]
    pub fn new(inner: FieldCommon) -> Self {
        Self { inner, rules: None }
    }

    pub fn with_rules(mut self, rules: TextRules) -> Self {
        self.rules = Some(rules);
        self
    }
}

crate::impl_field!(TextField);
