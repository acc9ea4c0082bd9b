use serde_json::json;

use formfold::{
    prepare_fields, Field, FieldVariant, FormFoldError, JsonField, SchemaError,
};

fn raw(value: serde_json::Value) -> Vec<JsonField> {
    serde_json::from_value(value).unwrap()
}

fn names(fields: &[FieldVariant]) -> Vec<String> {
    fields.iter().map(|field| field.name().to_string()).collect()
}

#[test]
fn test_prepare_fields_normalizes_checks_and_sorts() {
    let fields = prepare_fields(&raw(json!([
        {"name": " notes ", "label": " Notes ", "type": "textarea", "order": 7},
        {"name": "age", "label": "Age", "type": "number", "order": 1},
        {"name": "accept", "label": "Accept", "type": "checkbox"}
    ])))
    .unwrap();

    // Sorted by order: age (1), accept (positional 2), notes (7).
    assert_eq!(names(&fields), vec!["age", "accept", "notes"]);
    assert_eq!(fields[2].name(), "notes");
    assert_eq!(fields[2].label(), "Notes");
}

#[test]
fn test_prepare_fields_rejects_duplicate_names_anywhere() {
    let err = prepare_fields(&raw(json!([
        {"name": "email", "label": "Email", "type": "email"},
        {"name": "contact", "label": "Contact", "type": "select", "options": [
            {"label": "Other", "value": "other", "nestedFields": [
                {"name": "email", "label": "Alternate", "type": "email"}
            ]}
        ]}
    ])))
    .unwrap_err();

    assert_eq!(err.kind(), "duplicate_name");
    assert!(matches!(err, SchemaError::DuplicateFieldName(name) if name == "email"));
}

#[test]
fn test_prepare_fields_rejects_unnamed_fields() {
    let err = prepare_fields(&raw(json!([
        {"label": "Anonymous", "type": "text"}
    ])))
    .unwrap_err();

    assert!(matches!(err, SchemaError::InvalidField(_)));
}

#[test]
fn test_canonical_tree_round_trips_through_wire() {
    let fields = prepare_fields(&raw(json!([
        {"name": "plan", "label": "Plan", "type": "radio", "required": true, "options": [
            {"label": "Pro", "value": "pro", "nestedFields": [
                {"name": "seats", "label": "Seats", "type": "number", "required": true,
                 "validation": {"min": 1, "max": 500}}
            ]},
            {"label": "Free", "value": "free"}
        ]},
        {"name": "bio", "label": "Bio", "type": "textarea",
         "validation": {"min": 10, "max": 400, "regex": "^[^<>]*$"}}
    ])))
    .unwrap();

    let encoded = serde_json::to_string(&fields).unwrap();
    let decoded: Vec<FieldVariant> = serde_json::from_str(&encoded).unwrap();

    assert_eq!(fields, decoded);
}

#[test]
fn test_prepare_fields_stable_under_repreparation() {
    let first = prepare_fields(&raw(json!([
        {"name": "b", "label": "B", "type": "text", "order": 2},
        {"name": "a", "label": "A", "type": "text", "order": 1}
    ])))
    .unwrap();

    let wire = serde_json::to_value(&first).unwrap();
    let second = prepare_fields(&serde_json::from_value::<Vec<JsonField>>(wire).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_schema_error_converts_into_crate_error() {
    let err = prepare_fields(&raw(json!([
        {"name": "plan", "label": "Plan", "type": "select"}
    ])))
    .unwrap_err();

    let unified: FormFoldError = err.into();
    assert!(matches!(
        unified,
        FormFoldError::Schema(SchemaError::MissingOptions(_))
    ));
}
