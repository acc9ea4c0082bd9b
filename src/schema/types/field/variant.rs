use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::schema::types::field::{
    CheckboxField, ChoiceField, DateField, Field, FieldCommon, FieldType, NumberField,
    NumberRules, TextField, TextRules, ValidationRules,
};

/// One selectable choice belonging to a choice-type field.
///
/// Options own the fields that are revealed only when the option is
/// selected; ownership is strictly downward, so trees are finite and
/// acyclic by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
    #[serde(rename = "nestedFields", default)]
    pub nested_fields: Vec<FieldVariant>,
}

impl FieldOption {
    #[must_use]
    pub fn new(label: String, value: String) -> Self {
        Self {
            label,
            value,
            nested_fields: Vec::new(),
        }
    }
}

/// Enumeration over all field variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldVariant {
    /// Single-line text input
    Text(TextField),
    /// Multi-line text input
    Textarea(TextField),
    /// Text input validated as an email address
    Email(TextField),
    /// Numeric input
    Number(NumberField),
    /// Date input
    Date(DateField),
    /// Boolean toggle, or a multi-select group when options are present
    Checkbox(CheckboxField),
    /// Single choice rendered as radio buttons
    Radio(ChoiceField),
    /// Single choice rendered as a dropdown
    Select(ChoiceField),
}

impl FieldVariant {
    /// The wire tag for this variant.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Textarea(_) => FieldType::Textarea,
            Self::Email(_) => FieldType::Email,
            Self::Number(_) => FieldType::Number,
            Self::Date(_) => FieldType::Date,
            Self::Checkbox(_) => FieldType::Checkbox,
            Self::Radio(_) => FieldType::Radio,
            Self::Select(_) => FieldType::Select,
        }
    }

    /// Options declared on this field; empty for variants that carry none.
    pub fn options(&self) -> &[FieldOption] {
        match self {
            Self::Checkbox(f) => &f.options,
            Self::Radio(f) | Self::Select(f) => &f.options,
            _ => &[],
        }
    }

    /// Mutable access to the option list, for variants that carry one.
    pub fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        match self {
            Self::Checkbox(f) => Some(&mut f.options),
            Self::Radio(f) | Self::Select(f) => Some(&mut f.options),
            _ => None,
        }
    }

    /// Text constraint rules, for the text-like variants.
    pub fn text_rules(&self) -> Option<&TextRules> {
        match self {
            Self::Text(f) | Self::Textarea(f) | Self::Email(f) => f.rules.as_ref(),
            _ => None,
        }
    }

    /// Numeric range rules, for number fields.
    pub fn number_rules(&self) -> Option<&NumberRules> {
        match self {
            Self::Number(f) => f.rules.as_ref(),
            _ => None,
        }
    }

    fn common(&self) -> &FieldCommon {
        match self {
            Self::Text(f) | Self::Textarea(f) | Self::Email(f) => &f.inner,
            Self::Number(f) => &f.inner,
            Self::Date(f) => &f.inner,
            Self::Checkbox(f) => &f.inner,
            Self::Radio(f) | Self::Select(f) => &f.inner,
        }
    }

    fn common_mut(&mut self) -> &mut FieldCommon {
        match self {
            Self::Text(f) | Self::Textarea(f) | Self::Email(f) => &mut f.inner,
            Self::Number(f) => &mut f.inner,
            Self::Date(f) => &mut f.inner,
            Self::Checkbox(f) => &mut f.inner,
            Self::Radio(f) | Self::Select(f) => &mut f.inner,
        }
    }

    fn validation_bag(&self) -> Option<ValidationRules> {
        match self {
            Self::Text(f) | Self::Textarea(f) | Self::Email(f) => {
                f.rules.as_ref().map(|rules| ValidationRules {
                    min: rules.min,
                    max: rules.max,
                    regex: rules.regex.clone(),
                })
            }
            Self::Number(f) => f.rules.as_ref().map(|rules| ValidationRules {
                min: rules.min,
                max: rules.max,
                regex: None,
            }),
            _ => None,
        }
    }

    /// Builds the variant matching `field_type`, keeping only the attributes
    /// that apply to it: options for choice types, length/pattern rules for
    /// text-like types, range rules for numbers.
    pub(crate) fn assemble(
        inner: FieldCommon,
        field_type: FieldType,
        validation: Option<ValidationRules>,
        options: Vec<FieldOption>,
    ) -> Self {
        match field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Email => {
                let field = TextField {
                    inner,
                    rules: validation.and_then(text_rules_from_bag),
                };
                match field_type {
                    FieldType::Text => Self::Text(field),
                    FieldType::Textarea => Self::Textarea(field),
                    _ => Self::Email(field),
                }
            }
            FieldType::Number => Self::Number(NumberField {
                inner,
                rules: validation.and_then(number_rules_from_bag),
            }),
            FieldType::Date => Self::Date(DateField { inner }),
            FieldType::Checkbox => Self::Checkbox(CheckboxField { inner, options }),
            FieldType::Radio => Self::Radio(ChoiceField { inner, options }),
            FieldType::Select => Self::Select(ChoiceField { inner, options }),
        }
    }
}

impl Field for FieldVariant {
    fn name(&self) -> &str {
        &self.common().name
    }

    fn label(&self) -> &str {
        &self.common().label
    }

    fn description(&self) -> Option<&str> {
        self.common().description.as_deref()
    }

    fn required(&self) -> bool {
        self.common().required
    }

    fn order(&self) -> u32 {
        self.common().order
    }

    fn set_order(&mut self, order: u32) {
        self.common_mut().order = order;
    }
}

fn text_rules_from_bag(bag: ValidationRules) -> Option<TextRules> {
    if bag.is_empty() {
        return None;
    }
    Some(TextRules {
        min: bag.min,
        max: bag.max,
        regex: bag.regex,
    })
}

fn number_rules_from_bag(bag: ValidationRules) -> Option<NumberRules> {
    if bag.min.is_none() && bag.max.is_none() {
        return None;
    }
    Some(NumberRules {
        min: bag.min,
        max: bag.max,
    })
}

/// The flat wire shape shared by every variant: common attributes plus a
/// `type` tag, an optional `validation` bag, and an `options` list.
#[derive(Serialize, Deserialize)]
struct FieldWire {
    #[serde(flatten)]
    inner: FieldCommon,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<ValidationRules>,
    #[serde(default)]
    options: Vec<FieldOption>,
}

impl Serialize for FieldVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = FieldWire {
            inner: self.common().clone(),
            field_type: self.field_type(),
            validation: self.validation_bag(),
            options: self.options().to_vec(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = FieldWire::deserialize(deserializer)?;
        Ok(Self::assemble(
            wire.inner,
            wire.field_type,
            wire.validation,
            wire.options,
        ))
    }
}
