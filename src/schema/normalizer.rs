//! Canonicalization of raw field definitions.
//!
//! Raw definitions arrive from a builder client or a stored document with
//! stray whitespace, missing defaults, and attributes that do not apply to
//! the declared control type. Normalization produces a fresh canonical tree:
//! trimmed identifiers, defaulted flags, deterministic `order` ranks, and
//! per-type validation rules, with the option rule for choice fields
//! enforced at every level.

use regex::Regex;

use crate::schema::types::field::{FieldCommon, FieldOption, FieldType, FieldVariant, ValidationRules};
use crate::schema::types::{JsonField, JsonFieldOption, SchemaError};

/// Normalizes a raw field tree into canonical form.
///
/// Returns a fresh tree; the input is never mutated, so callers may keep the
/// raw definitions around for diffing or error reporting. Fields without a
/// usable `order` are ranked by their positional index among their current
/// siblings; nested lists get their own zero-based fallback per option.
///
/// # Errors
/// Returns a `SchemaError` if a select/radio field ends up with no options,
/// or if a configured `regex` pattern does not compile.
pub fn normalize_fields(raw: &[JsonField]) -> Result<Vec<FieldVariant>, SchemaError> {
    raw.iter()
        .enumerate()
        .map(|(index, field)| normalize_field(field, index))
        .collect()
}

fn normalize_field(raw: &JsonField, index: usize) -> Result<FieldVariant, SchemaError> {
    let name = raw.name.as_deref().unwrap_or("").trim().to_string();
    let label = raw.label.as_deref().unwrap_or("").trim().to_string();

    let inner = FieldCommon {
        name: name.clone(),
        label,
        description: raw.description.clone(),
        required: raw.required,
        order: normalize_order(raw.order, index),
    };

    let options = raw
        .options
        .iter()
        .map(normalize_option)
        .collect::<Result<Vec<_>, _>>()?;

    let validation = match raw.field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Email => {
            checked_text_rules(&name, raw.validation.as_ref())?
        }
        FieldType::Number => raw.validation.as_ref().map(|bag| ValidationRules {
            min: bag.min,
            max: bag.max,
            regex: None,
        }),
        _ => None,
    };

    let field = FieldVariant::assemble(inner, raw.field_type, validation, options);

    if matches!(raw.field_type, FieldType::Select | FieldType::Radio)
        && field.options().is_empty()
    {
        return Err(SchemaError::MissingOptions(name));
    }

    Ok(field)
}

fn normalize_option(raw: &JsonFieldOption) -> Result<FieldOption, SchemaError> {
    let nested_fields = normalize_fields(&raw.nested_fields)?;
    Ok(FieldOption {
        label: raw.label.as_deref().unwrap_or("").trim().to_string(),
        value: raw.value.as_deref().unwrap_or("").trim().to_string(),
        nested_fields,
    })
}

/// A declared `order` is kept only when it is a non-negative integer value;
/// anything else falls back to the positional index.
fn normalize_order(raw: Option<f64>, index: usize) -> u32 {
    match raw {
        Some(order)
            if order >= 0.0 && order.fract() == 0.0 && order <= f64::from(u32::MAX) =>
        {
            order as u32
        }
        _ => index as u32,
    }
}

/// Compile-checks a configured pattern so an unusable regex is rejected at
/// authoring time instead of surfacing on the first submission.
fn checked_text_rules(
    name: &str,
    bag: Option<&ValidationRules>,
) -> Result<Option<ValidationRules>, SchemaError> {
    match bag {
        None => Ok(None),
        Some(bag) => {
            if let Some(pattern) = &bag.regex {
                Regex::new(pattern).map_err(|err| SchemaError::InvalidRegex {
                    field: name.to_string(),
                    message: err.to_string(),
                })?;
            }
            Ok(Some(bag.clone()))
        }
    }
}
