use serde_json::{json, Map, Value};

use formfold::{
    Field, FormFoldError, FormManager, FormUpdate, JsonField, SchemaError, SubmissionMeta,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn raw(value: serde_json::Value) -> Vec<JsonField> {
    serde_json::from_value(value).unwrap()
}

fn raw_field(value: serde_json::Value) -> JsonField {
    serde_json::from_value(value).unwrap()
}

fn answers(value: serde_json::Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

fn basic_fields() -> Vec<JsonField> {
    raw(json!([
        {"name": "title", "label": "Title", "type": "text", "required": true},
        {"name": "plan", "label": "Plan", "type": "radio", "options": [
            {"label": "Pro", "value": "pro", "nestedFields": [
                {"name": "seats", "label": "Seats", "type": "number", "required": true}
            ]},
            {"label": "Free", "value": "free"}
        ]}
    ]))
}

#[test]
fn test_create_and_get_form() {
    init_logging();
    let manager = FormManager::new();

    let form = manager
        .create_form("Signup", "Event signup form", &basic_fields())
        .unwrap();
    assert_eq!(form.version, 1);
    assert_eq!(form.fields.len(), 2);

    let fetched = manager.get_form(&form.id).unwrap();
    assert_eq!(fetched.title, "Signup");
    assert_eq!(fetched.version, 1);
}

#[test]
fn test_create_form_rejects_empty_title_and_duplicates() {
    let manager = FormManager::new();

    let empty_title = manager.create_form("   ", "", &basic_fields()).unwrap_err();
    assert!(matches!(
        empty_title,
        FormFoldError::Schema(SchemaError::InvalidField(_))
    ));

    let duplicated = raw(json!([
        {"name": "title", "label": "Title", "type": "text"},
        {"name": "title", "label": "Title again", "type": "text"}
    ]));
    let err = manager.create_form("Signup", "", &duplicated).unwrap_err();
    assert!(matches!(
        err,
        FormFoldError::Schema(SchemaError::DuplicateFieldName(_))
    ));
}

#[test]
fn test_update_form_fields_bumps_version_metadata_does_not() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let renamed = manager
        .update_form(
            &form.id,
            FormUpdate {
                title: Some("Renamed".to_string()),
                ..FormUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.title, "Renamed");
    assert_eq!(renamed.version, 1);

    let refielded = manager
        .update_form(
            &form.id,
            FormUpdate {
                fields: Some(raw(json!([
                    {"name": "only", "label": "Only", "type": "text"}
                ]))),
                ..FormUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(refielded.version, 2);
    assert_eq!(refielded.fields.len(), 1);
}

#[test]
fn test_update_form_requires_some_property() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let err = manager
        .update_form(&form.id, FormUpdate::default())
        .unwrap_err();
    assert!(matches!(
        err,
        FormFoldError::Schema(SchemaError::InvalidField(_))
    ));
}

#[test]
fn test_add_field_bumps_version_and_rejects_existing_names() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let added = manager
        .add_field(
            &form.id,
            &raw_field(json!({"name": "notes", "label": "Notes", "type": "textarea"})),
        )
        .unwrap();
    assert_eq!(added.version, 2);
    assert!(added.fields.iter().any(|field| field.name() == "notes"));

    let root_clash = manager
        .add_field(
            &form.id,
            &raw_field(json!({"name": "title", "label": "Title", "type": "text"})),
        )
        .unwrap_err();
    assert!(matches!(
        root_clash,
        FormFoldError::Schema(SchemaError::AlreadyExists(name)) if name == "title"
    ));

    // A name nested inside an option is also taken.
    let nested_clash = manager
        .add_field(
            &form.id,
            &raw_field(json!({"name": "seats", "label": "Seats", "type": "number"})),
        )
        .unwrap_err();
    assert!(matches!(
        nested_clash,
        FormFoldError::Schema(SchemaError::AlreadyExists(name)) if name == "seats"
    ));
}

#[test]
fn test_update_field_replaces_nested_definition() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let updated = manager
        .update_field(
            &form.id,
            "seats",
            &raw_field(json!({"name": "seats", "label": "Seat count", "type": "number",
                              "validation": {"min": 1}})),
        )
        .unwrap();
    assert_eq!(updated.version, 2);

    let mismatch = manager
        .update_field(
            &form.id,
            "seats",
            &raw_field(json!({"name": "chairs", "label": "Chairs", "type": "number"})),
        )
        .unwrap_err();
    assert!(matches!(
        mismatch,
        FormFoldError::Schema(SchemaError::InvalidField(_))
    ));

    let missing = manager
        .update_field(
            &form.id,
            "ghost",
            &raw_field(json!({"name": "ghost", "label": "Ghost", "type": "text"})),
        )
        .unwrap_err();
    assert!(matches!(
        missing,
        FormFoldError::Schema(SchemaError::NotFound(_))
    ));
}

#[test]
fn test_remove_field_reaches_nested_branches() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let removed = manager.remove_field(&form.id, "seats").unwrap();
    assert_eq!(removed.version, 2);

    let err = manager.remove_field(&form.id, "seats").unwrap_err();
    assert!(matches!(err, FormFoldError::Schema(SchemaError::NotFound(_))));
}

#[test]
fn test_reorder_fields_via_manager() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let reordered = manager
        .reorder_fields(&form.id, &["plan".to_string(), "title".to_string()])
        .unwrap();
    assert_eq!(reordered.version, 2);
    assert_eq!(reordered.fields[0].name(), "plan");
    assert_eq!(reordered.fields[1].name(), "title");

    let err = manager.reorder_fields(&form.id, &[]).unwrap_err();
    assert!(matches!(
        err,
        FormFoldError::Schema(SchemaError::InvalidField(_))
    ));
}

#[test]
fn test_failed_mutation_leaves_version_untouched() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let _ = manager
        .add_field(
            &form.id,
            &raw_field(json!({"name": "title", "label": "Title", "type": "text"})),
        )
        .unwrap_err();

    assert_eq!(manager.get_form(&form.id).unwrap().version, 1);
}

fn nested_chain(prefix: &str, depth: usize) -> serde_json::Value {
    let mut node = json!({"name": format!("{}_leaf", prefix), "label": "Leaf", "type": "text"});
    for level in (0..depth).rev() {
        node = json!({
            "name": format!("{}_{}", prefix, level),
            "label": "Level",
            "type": "radio",
            "options": [
                {"label": "Deeper", "value": "deeper", "nestedFields": [node]}
            ]
        });
    }
    node
}

#[test]
fn test_update_field_rejects_excessive_combined_nesting() {
    let manager = FormManager::new();
    // Nine radio levels plus a leaf: depth 10, fine on its own.
    let form = manager
        .create_form("Deep", "", &raw(json!([nested_chain("a", 9)])))
        .unwrap();

    // The replacement is valid standalone (depth 9 from its own root) but
    // splices in at depth 10.
    let mut replacement = nested_chain("b", 8);
    replacement["name"] = json!("a_leaf");
    let err = manager
        .update_field(&form.id, "a_leaf", &raw_field(replacement))
        .unwrap_err();

    assert!(matches!(
        err,
        FormFoldError::Schema(SchemaError::NestingTooDeep { .. })
    ));
    assert_eq!(manager.get_form(&form.id).unwrap().version, 1);
}

#[test]
fn test_add_field_rejects_excessive_combined_field_count() {
    let manager = FormManager::new();
    let many: Vec<serde_json::Value> = (0..250)
        .map(|index| json!({"name": format!("f{}", index), "label": "F", "type": "text"}))
        .collect();
    let form = manager
        .create_form("Big", "", &raw(serde_json::Value::Array(many)))
        .unwrap();

    // Ten more fields push the combined tree past the cap.
    let nested: Vec<serde_json::Value> = (0..9)
        .map(|index| json!({"name": format!("extra_n{}", index), "label": "N", "type": "text"}))
        .collect();
    let err = manager
        .add_field(
            &form.id,
            &raw_field(json!({
                "name": "extra", "label": "Extra", "type": "radio",
                "options": [{"label": "Yes", "value": "yes", "nestedFields": nested}]
            })),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        FormFoldError::Schema(SchemaError::TreeTooLarge { .. })
    ));
    assert_eq!(manager.get_form(&form.id).unwrap().version, 1);
}

#[test]
fn test_submit_snapshots_schema_and_version() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let submission = manager
        .submit(
            &form.id,
            &answers(json!({"title": "hello", "plan": "pro", "seats": 3})),
            SubmissionMeta::default(),
        )
        .unwrap();

    assert_eq!(submission.form_id, form.id);
    assert_eq!(submission.form_version, 1);
    assert_eq!(submission.answers.get("seats"), Some(&json!(3)));
    assert_eq!(submission.schema_snapshot.len(), 2);

    // A later schema change does not rewrite the stored snapshot.
    manager.remove_field(&form.id, "seats").unwrap();
    let page = manager.list_submissions(Some(&form.id), 1, 10).unwrap();
    assert_eq!(page.items[0].form_version, 1);
    assert_eq!(page.items[0].schema_snapshot.len(), 2);
}

#[test]
fn test_submit_rejects_invalid_answers() {
    let manager = FormManager::new();
    let form = manager.create_form("Signup", "", &basic_fields()).unwrap();

    let err = manager
        .submit(
            &form.id,
            &answers(json!({"plan": "pro"})),
            SubmissionMeta::default(),
        )
        .unwrap_err();
    assert!(matches!(err, FormFoldError::Submission(_)));

    let page = manager.list_submissions(Some(&form.id), 1, 10).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_list_submissions_pages_and_clamps() {
    let manager = FormManager::new();
    let form = manager
        .create_form(
            "Signup",
            "",
            &raw(json!([{"name": "title", "label": "Title", "type": "text"}])),
        )
        .unwrap();

    for index in 0..3 {
        manager
            .submit(
                &form.id,
                &answers(json!({"title": format!("entry {}", index)})),
                SubmissionMeta::default(),
            )
            .unwrap();
    }

    let first = manager.list_submissions(Some(&form.id), 1, 2).unwrap();
    assert_eq!(first.total, 3);
    assert_eq!(first.items.len(), 2);

    let second = manager.list_submissions(Some(&form.id), 2, 2).unwrap();
    assert_eq!(second.items.len(), 1);

    let clamped = manager.list_submissions(None, 1, 1000).unwrap();
    assert_eq!(clamped.page_size, 100);
    assert_eq!(clamped.total, 3);
}

#[test]
fn test_delete_form_removes_its_submissions() {
    let manager = FormManager::new();
    let form = manager
        .create_form(
            "Signup",
            "",
            &raw(json!([{"name": "title", "label": "Title", "type": "text"}])),
        )
        .unwrap();
    manager
        .submit(
            &form.id,
            &answers(json!({"title": "hello"})),
            SubmissionMeta::default(),
        )
        .unwrap();

    manager.delete_form(&form.id).unwrap();

    assert!(matches!(
        manager.get_form(&form.id).unwrap_err(),
        FormFoldError::Schema(SchemaError::NotFound(_))
    ));
    assert_eq!(manager.list_submissions(None, 1, 10).unwrap().total, 0);
}

#[test]
fn test_archived_forms_hidden_from_listing_but_addressable() {
    let manager = FormManager::new();
    let form = manager
        .create_form(
            "Signup",
            "",
            &raw(json!([{"name": "title", "label": "Title", "type": "text"}])),
        )
        .unwrap();

    manager.archive_form(&form.id).unwrap();

    assert!(manager.list_forms().unwrap().is_empty());
    assert!(manager.get_form(&form.id).unwrap().is_archived);
}
