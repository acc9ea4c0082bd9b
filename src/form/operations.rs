//! Canonicalization pipeline and structural mutations on a form's tree.
//!
//! Every mutation validates the would-be tree before committing, bumps the
//! form version exactly once on success, and leaves the form untouched on
//! failure.

use chrono::Utc;

use crate::form::types::Form;
use crate::schema::invariants::{assert_tree_limits, assert_unique_names, assert_well_formed};
use crate::schema::locator::{find_field_by_name, remove_field_by_name, replace_field_by_name};
use crate::schema::normalizer::normalize_fields;
use crate::schema::ordering::{apply_reorder, sort_fields_in_place};
use crate::schema::types::field::Field;
use crate::schema::types::{FieldVariant, JsonField, SchemaError};

/// Runs the full canonicalization pipeline over raw field definitions:
/// normalize, check well-formedness, name uniqueness and tree limits, then
/// sort every sibling list.
///
/// # Errors
/// Any violation aborts the whole operation; no partially prepared tree is
/// returned.
pub fn prepare_fields(raw: &[JsonField]) -> Result<Vec<FieldVariant>, SchemaError> {
    let mut fields = normalize_fields(raw)?;
    assert_well_formed(&fields)?;
    assert_unique_names(&fields)?;
    assert_tree_limits(&fields)?;
    sort_fields_in_place(&mut fields);
    Ok(fields)
}

/// Prepares a single raw field definition for a targeted add/update.
pub fn prepare_field(raw: &JsonField) -> Result<FieldVariant, SchemaError> {
    let mut fields = prepare_fields(std::slice::from_ref(raw))?;
    match fields.pop() {
        Some(field) => Ok(field),
        None => Err(SchemaError::InvalidField(
            "Field definition is missing".to_string(),
        )),
    }
}

impl Form {
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn bump(&mut self) {
        self.version += 1;
        self.touch();
    }

    /// Replaces the whole field tree with an already-prepared one.
    pub fn replace_fields(&mut self, fields: Vec<FieldVariant>) {
        self.fields = fields;
        self.bump();
    }

    /// Adds a prepared field to the root of the tree.
    ///
    /// # Errors
    /// `AlreadyExists` if a field with the same name is present anywhere in
    /// the tree; `DuplicateFieldName` if a name nested inside the incoming
    /// field collides with the existing tree; `NestingTooDeep`/`TreeTooLarge`
    /// if the combined tree exceeds the limits.
    pub fn add_field(&mut self, field: FieldVariant) -> Result<(), SchemaError> {
        if find_field_by_name(&self.fields, field.name()).is_some() {
            return Err(SchemaError::AlreadyExists(field.name().to_string()));
        }

        let mut fields = self.fields.clone();
        fields.push(field);
        assert_unique_names(&fields)?;
        assert_tree_limits(&fields)?;
        sort_fields_in_place(&mut fields);
        self.fields = fields;
        self.bump();
        Ok(())
    }

    /// Replaces the field carrying the same name as `field`, wherever it
    /// lives in the tree.
    ///
    /// # Errors
    /// `NotFound` if no field carries that name; `DuplicateFieldName` if the
    /// replacement introduces a name collision; `NestingTooDeep`/
    /// `TreeTooLarge` if the replacement subtree pushes the tree past the
    /// limits.
    pub fn update_field(&mut self, field: FieldVariant) -> Result<(), SchemaError> {
        let name = field.name().to_string();
        let mut fields = self.fields.clone();
        if !replace_field_by_name(&mut fields, &name, field) {
            return Err(SchemaError::NotFound(format!("field '{}'", name)));
        }
        assert_unique_names(&fields)?;
        assert_tree_limits(&fields)?;
        sort_fields_in_place(&mut fields);
        self.fields = fields;
        self.bump();
        Ok(())
    }

    /// Removes the field with the given name, wherever it lives. Sibling
    /// ranks are not renumbered.
    ///
    /// # Errors
    /// `NotFound` if no field carries that name.
    pub fn remove_field(&mut self, name: &str) -> Result<(), SchemaError> {
        if !remove_field_by_name(&mut self.fields, name) {
            return Err(SchemaError::NotFound(format!("field '{}'", name)));
        }
        self.bump();
        Ok(())
    }

    /// Re-ranks fields by their position in `ordered_names` and re-sorts the
    /// whole tree. Names absent from the list keep their prior rank.
    pub fn reorder_fields(&mut self, ordered_names: &[String]) {
        apply_reorder(&mut self.fields, ordered_names);
        self.bump();
    }

    /// Marks the form as archived; archived forms are hidden from listings
    /// but stay addressable.
    pub fn archive(&mut self) {
        self.is_archived = true;
        self.touch();
    }
}
