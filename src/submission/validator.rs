//! Validation and sanitization of respondent answers.
//!
//! Walks the schema tree in declaration order, looking each field's answer
//! up by name in the raw answer map. Values are coerced per field type,
//! constraints are checked, and nested fields are visited only along the
//! branches the selected options reveal. Unknown keys in the answer map are
//! ignored. The walk fails fast on the first violation.
//!
//! Nested recursion always reads from the same original answer map; field
//! names are globally unique in a canonical tree, so lookups never collide
//! across branches.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map as JsonMap, Number, Value};

use crate::error::FormFoldResult;
use crate::schema::types::field::{
    CheckboxField, ChoiceField, DateField, Field, FieldOption, FieldVariant, NumberField,
    TextField, TextRules,
};
use crate::schema::types::{SchemaError, SubmissionError};

/// Single-`@` with a dotted domain.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Validates a raw answer map against a canonical field tree.
///
/// Returns the sanitized answer map: values coerced to the types implied by
/// each field, keyed by field name. Fields without a value that are not
/// required contribute nothing; checkboxes always contribute their coerced
/// value (a boolean, or a selection array for groups).
///
/// # Errors
/// `FormFoldError::Submission` for respondent faults, failing on the first
/// violation in schema declaration order. `FormFoldError::Schema` when the
/// schema itself is misconfigured: a choice field without options, or a
/// configured pattern that does not compile.
pub fn validate_submission(
    fields: &[FieldVariant],
    answers: &JsonMap<String, Value>,
) -> FormFoldResult<JsonMap<String, Value>> {
    let mut sanitized = JsonMap::new();
    for field in fields {
        process_field(field, answers, &mut sanitized)?;
    }
    Ok(sanitized)
}

fn process_field(
    field: &FieldVariant,
    answers: &JsonMap<String, Value>,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let raw = answers.get(field.name());
    let has_value = match raw {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    };

    // Checkboxes are the one type that still produces a sanitized value
    // when the answer is absent.
    if let FieldVariant::Checkbox(checkbox) = field {
        if checkbox.is_group() {
            return process_checkbox_group(checkbox, raw, has_value, answers, sanitized);
        }
        return process_plain_checkbox(checkbox, raw, sanitized);
    }

    if !has_value {
        if field.required() {
            return Err(SubmissionError::MissingRequiredField(field.name().to_string()).into());
        }
        return Ok(());
    }
    let value = match raw {
        Some(value) => value,
        None => return Ok(()),
    };

    match field {
        FieldVariant::Radio(choice) | FieldVariant::Select(choice) => {
            process_choice(choice, value, answers, sanitized)
        }
        FieldVariant::Text(text) | FieldVariant::Textarea(text) => {
            process_text(text, value, sanitized, false)
        }
        FieldVariant::Email(text) => process_text(text, value, sanitized, true),
        FieldVariant::Number(number) => process_number(number, value, sanitized),
        FieldVariant::Date(date) => process_date(date, value, sanitized),
        FieldVariant::Checkbox(_) => Ok(()),
    }
}

fn process_nested(
    option: &FieldOption,
    answers: &JsonMap<String, Value>,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    for nested in &option.nested_fields {
        process_field(nested, answers, sanitized)?;
    }
    Ok(())
}

fn process_choice(
    choice: &ChoiceField,
    value: &Value,
    answers: &JsonMap<String, Value>,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let name = choice.name();
    if choice.options.is_empty() {
        return Err(SchemaError::MissingOptions(name.to_string()).into());
    }
    let selected = value.as_str().ok_or_else(|| SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "a single option",
    })?;
    let option = choice
        .options
        .iter()
        .find(|option| option.value == selected)
        .ok_or_else(|| SubmissionError::UnknownOption(name.to_string()))?;

    sanitized.insert(name.to_string(), Value::String(selected.to_string()));
    process_nested(option, answers, sanitized)
}

fn process_checkbox_group(
    checkbox: &CheckboxField,
    raw: Option<&Value>,
    has_value: bool,
    answers: &JsonMap<String, Value>,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let name = checkbox.name();
    if !has_value {
        if checkbox.required() {
            return Err(SubmissionError::MissingRequiredField(name.to_string()).into());
        }
        sanitized.insert(name.to_string(), Value::Array(Vec::new()));
        return Ok(());
    }
    let value = match raw {
        Some(value) => value,
        None => return Ok(()),
    };
    let entries = value.as_array().ok_or_else(|| SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "an array of selections",
    })?;

    let mut selected: Vec<&str> = Vec::with_capacity(entries.len());
    for entry in entries {
        let text = entry.as_str().ok_or_else(|| SubmissionError::InvalidType {
            field: name.to_string(),
            expected: "an array of selections",
        })?;
        if !checkbox.options.iter().any(|option| option.value == text) {
            return Err(SubmissionError::UnknownOption(name.to_string()).into());
        }
        selected.push(text);
    }
    if checkbox.required() && selected.is_empty() {
        return Err(SubmissionError::MissingRequiredField(name.to_string()).into());
    }

    sanitized.insert(name.to_string(), value.clone());
    for option in &checkbox.options {
        if selected.iter().any(|text| *text == option.value) {
            process_nested(option, answers, sanitized)?;
        }
    }
    Ok(())
}

fn process_plain_checkbox(
    checkbox: &CheckboxField,
    raw: Option<&Value>,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let name = checkbox.name();
    let checked = raw.map(coerce_boolean).unwrap_or(false);
    if checkbox.required() && !checked {
        return Err(SubmissionError::MissingRequiredField(name.to_string()).into());
    }
    sanitized.insert(name.to_string(), Value::Bool(checked));
    Ok(())
}

fn process_text(
    field: &TextField,
    value: &Value,
    sanitized: &mut JsonMap<String, Value>,
    is_email: bool,
) -> FormFoldResult<()> {
    let name = field.name();
    let text = value.as_str().ok_or_else(|| SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "text input",
    })?;

    if is_email && !EMAIL_PATTERN.is_match(text) {
        return Err(SubmissionError::InvalidEmail(name.to_string()).into());
    }

    if let Some(rules) = &field.rules {
        check_text_rules(name, text, rules)?;
    }

    sanitized.insert(name.to_string(), Value::String(text.to_string()));
    Ok(())
}

fn check_text_rules(name: &str, text: &str, rules: &TextRules) -> FormFoldResult<()> {
    let length = text.chars().count() as f64;
    if let Some(min) = rules.min {
        if length < min {
            return Err(SubmissionError::OutOfRange {
                field: name.to_string(),
                message: format!("must have at least {} characters", min),
            }
            .into());
        }
    }
    if let Some(max) = rules.max {
        if length > max {
            return Err(SubmissionError::OutOfRange {
                field: name.to_string(),
                message: format!("must have at most {} characters", max),
            }
            .into());
        }
    }
    if let Some(pattern) = &rules.regex {
        // A pattern that no longer compiles is a configuration fault, not a
        // submission fault.
        let regex = Regex::new(pattern).map_err(|err| SchemaError::InvalidRegex {
            field: name.to_string(),
            message: err.to_string(),
        })?;
        if !regex.is_match(text) {
            return Err(SubmissionError::PatternMismatch(name.to_string()).into());
        }
    }
    Ok(())
}

fn process_number(
    field: &NumberField,
    value: &Value,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let name = field.name();
    let (number, stored) = coerce_number(name, value)?;

    if let Some(rules) = &field.rules {
        if let Some(min) = rules.min {
            if number < min {
                return Err(SubmissionError::OutOfRange {
                    field: name.to_string(),
                    message: format!("must be >= {}", min),
                }
                .into());
            }
        }
        if let Some(max) = rules.max {
            if number > max {
                return Err(SubmissionError::OutOfRange {
                    field: name.to_string(),
                    message: format!("must be <= {}", max),
                }
                .into());
            }
        }
    }

    sanitized.insert(name.to_string(), stored);
    Ok(())
}

fn process_date(
    field: &DateField,
    value: &Value,
    sanitized: &mut JsonMap<String, Value>,
) -> FormFoldResult<()> {
    let name = field.name();
    let text = value.as_str().ok_or_else(|| SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "a valid date",
    })?;
    let parsed = parse_date(text).ok_or_else(|| SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "a valid date",
    })?;

    sanitized.insert(
        name.to_string(),
        Value::String(parsed.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    Ok(())
}

fn invalid_number(name: &str) -> SubmissionError {
    SubmissionError::InvalidType {
        field: name.to_string(),
        expected: "a numeric value",
    }
}

/// Coerces a JSON number or a numeric string. Returns the parsed value for
/// range checks plus the value to store: numbers are stored verbatim so
/// integer answers stay integers.
fn coerce_number(name: &str, value: &Value) -> FormFoldResult<(f64, Value)> {
    match value {
        Value::Number(number) => {
            let parsed = number.as_f64().ok_or_else(|| invalid_number(name))?;
            Ok((parsed, value.clone()))
        }
        Value::String(text) => {
            let parsed: f64 = text.trim().parse().map_err(|_| invalid_number(name))?;
            if !parsed.is_finite() {
                return Err(invalid_number(name).into());
            }
            let stored = Number::from_f64(parsed).ok_or_else(|| invalid_number(name))?;
            Ok((parsed, Value::Number(stored)))
        }
        _ => Err(invalid_number(name).into()),
    }
}

/// JSON truthiness: `false`, `0`, `""`, and `null` are false; everything
/// else is true.
fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Accepts RFC 3339, RFC 2822, and the common date-only / naive datetime
/// forms; naive inputs are taken as UTC.
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0)?));
    }
    None
}
