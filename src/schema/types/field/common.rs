use serde::{Deserialize, Serialize};
use std::fmt;

/// Common interface for all field variants.
///
/// The `Field` trait exposes accessors for the properties shared by every
/// field implementation, regardless of its control type.
pub trait Field {
    /// Returns the stable identifier of this field, unique across the tree.
    fn name(&self) -> &str;

    /// Returns the display label of this field.
    fn label(&self) -> &str;

    /// Returns the optional description shown alongside the field.
    fn description(&self) -> Option<&str>;

    /// Indicates whether an answer for this field is mandatory.
    fn required(&self) -> bool;

    /// Returns the rank of this field among its siblings.
    fn order(&self) -> u32;

    /// Sets the rank of this field among its siblings.
    fn set_order(&mut self, order: u32);
}

/// The closed set of control types a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Email,
    Date,
    Checkbox,
    Radio,
    Select,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
        };
        write!(f, "{}", name)
    }
}

/// Attributes shared by every field variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCommon {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: u32,
}

impl FieldCommon {
    #[must_use]
    pub fn new(name: String, label: String) -> Self {
        Self {
            name,
            label,
            description: None,
            required: false,
            order: 0,
        }
    }
}

/// The untyped `validation` bag as it appears on the wire. The normalizer
/// splits it into the typed rule sets below, keeping only the attributes
/// that apply to the declared control type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl ValidationRules {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.regex.is_none()
    }
}

/// Length bounds and an optional pattern for text-like fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub regex: Option<String>,
}

/// Numeric range bounds for number fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[macro_export]
macro_rules! impl_field {
    ($t:ty) => {
        impl $crate::schema::types::field::Field for $t {
            fn name(&self) -> &str {
                &self.inner.name
            }

            fn label(&self) -> &str {
                &self.inner.label
            }

            fn description(&self) -> Option<&str> {
                self.inner.description.as_deref()
            }

            fn required(&self) -> bool {
                self.inner.required
            }

            fn order(&self) -> u32 {
                self.inner.order
            }

            fn set_order(&mut self, order: u32) {
                self.inner.order = order;
            }
        }
    };
}
