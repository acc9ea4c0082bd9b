use serde::{Deserialize, Serialize};

use crate::schema::types::field::{FieldType, ValidationRules};

/// A field definition as supplied by a schema-authoring client or a stored
/// document.
///
/// Everything except the control type is optional here; the normalizer turns
/// this into the canonical representation and later layers reject what is
/// still missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonField {
    /// Transient builder-side identifier; dropped during normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    #[serde(default)]
    pub options: Vec<JsonFieldOption>,
}

/// An option definition as supplied by a schema-authoring client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFieldOption {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "nestedFields", default)]
    pub nested_fields: Vec<JsonField>,
}
