//! In-memory registry of forms and their submissions.
//!
//! This is the collection point partial-update endpoints and submission
//! intake operate against. Durable persistence belongs to an external
//! storage collaborator; the registry only guarantees that concurrent
//! callers never observe a partially mutated tree.

use std::collections::HashMap;
use std::sync::Mutex;

use log::info;
use serde_json::{Map as JsonMap, Value};
use uuid::Uuid;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{FormFoldError, FormFoldResult};
use crate::form::operations::{prepare_field, prepare_fields};
use crate::form::types::{Form, FormUpdate};
use crate::schema::types::field::Field;
use crate::schema::types::{JsonField, SchemaError};
use crate::submission::types::{Submission, SubmissionMeta, SubmissionPage};
use crate::submission::validator::validate_submission;

/// Thread-safe, in-memory store of forms and their submissions.
pub struct FormManager {
    forms: Mutex<HashMap<Uuid, Form>>,
    submissions: Mutex<HashMap<Uuid, Vec<Submission>>>,
}

impl FormManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            forms: Mutex::new(HashMap::new()),
            submissions: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a form from a raw field tree.
    pub fn create_form(
        &self,
        title: &str,
        description: &str,
        raw_fields: &[JsonField],
    ) -> FormFoldResult<Form> {
        let title = title.trim();
        if title.is_empty() {
            return Err(
                SchemaError::InvalidField("Form title cannot be empty".to_string()).into(),
            );
        }
        let fields = prepare_fields(raw_fields)?;
        let form = Form::new(title.to_string(), description.to_string(), fields);

        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        forms.insert(form.id, form.clone());
        info!("Created form '{}' ({})", form.title, form.id);
        Ok(form)
    }

    /// Fetches a form by id.
    pub fn get_form(&self, form_id: &Uuid) -> FormFoldResult<Form> {
        let forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        forms
            .get(form_id)
            .cloned()
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)).into())
    }

    /// Lists non-archived forms, most recently updated first.
    pub fn list_forms(&self) -> FormFoldResult<Vec<Form>> {
        let forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let mut listing: Vec<Form> = forms
            .values()
            .filter(|form| !form.is_archived)
            .cloned()
            .collect();
        listing.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(listing)
    }

    /// Applies a partial update. Replacing the field tree runs the full
    /// canonicalization pipeline and bumps the version; metadata-only
    /// updates do not.
    pub fn update_form(&self, form_id: &Uuid, update: FormUpdate) -> FormFoldResult<Form> {
        if update.is_empty() {
            return Err(SchemaError::InvalidField(
                "Provide at least one property to update".to_string(),
            )
            .into());
        }
        let title = match update.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(SchemaError::InvalidField(
                        "Form title cannot be empty".to_string(),
                    )
                    .into());
                }
                Some(title)
            }
            None => None,
        };
        let prepared = match &update.fields {
            Some(raw) => Some(prepare_fields(raw)?),
            None => None,
        };

        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;

        if let Some(title) = title {
            form.title = title;
        }
        if let Some(description) = update.description {
            form.description = description;
        }
        match prepared {
            Some(fields) => form.replace_fields(fields),
            None => form.touch(),
        }
        info!("Updated form '{}' (version {})", form.id, form.version);
        Ok(form.clone())
    }

    /// Archives a form, hiding it from listings.
    pub fn archive_form(&self, form_id: &Uuid) -> FormFoldResult<Form> {
        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;
        form.archive();
        info!("Archived form '{}'", form.id);
        Ok(form.clone())
    }

    /// Deletes a form and all of its submissions.
    pub fn delete_form(&self, form_id: &Uuid) -> FormFoldResult<()> {
        {
            let mut forms = self
                .forms
                .lock()
                .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
            if forms.remove(form_id).is_none() {
                return Err(SchemaError::NotFound(format!("form '{}'", form_id)).into());
            }
        }
        let mut submissions = self
            .submissions
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire submission lock".to_string()))?;
        let removed = submissions
            .remove(form_id)
            .map(|entries| entries.len())
            .unwrap_or(0);
        info!("Deleted form '{}' and {} submissions", form_id, removed);
        Ok(())
    }

    /// Adds a single field to a form's root sibling list.
    pub fn add_field(&self, form_id: &Uuid, raw: &JsonField) -> FormFoldResult<Form> {
        let field = prepare_field(raw)?;
        let field_name = field.name().to_string();

        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;
        form.add_field(field)?;
        info!(
            "Form '{}' gained field '{}' (version {})",
            form.id, field_name, form.version
        );
        Ok(form.clone())
    }

    /// Replaces the named field with a re-prepared definition. The payload
    /// name must match the targeted field.
    pub fn update_field(
        &self,
        form_id: &Uuid,
        field_name: &str,
        raw: &JsonField,
    ) -> FormFoldResult<Form> {
        let field = prepare_field(raw)?;
        if field.name() != field_name {
            return Err(SchemaError::InvalidField(
                "Field name in payload must match the targeted field".to_string(),
            )
            .into());
        }

        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;
        form.update_field(field)?;
        info!(
            "Form '{}' updated field '{}' (version {})",
            form.id, field_name, form.version
        );
        Ok(form.clone())
    }

    /// Removes the named field from a form.
    pub fn remove_field(&self, form_id: &Uuid, field_name: &str) -> FormFoldResult<Form> {
        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;
        form.remove_field(field_name)?;
        info!(
            "Form '{}' removed field '{}' (version {})",
            form.id, field_name, form.version
        );
        Ok(form.clone())
    }

    /// Re-ranks a form's fields by the given name order.
    pub fn reorder_fields(&self, form_id: &Uuid, ordered_names: &[String]) -> FormFoldResult<Form> {
        if ordered_names.is_empty() {
            return Err(
                SchemaError::InvalidField("Reorder list cannot be empty".to_string()).into(),
            );
        }

        let mut forms = self
            .forms
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire form lock".to_string()))?;
        let form = forms
            .get_mut(form_id)
            .ok_or_else(|| SchemaError::NotFound(format!("form '{}'", form_id)))?;
        form.reorder_fields(ordered_names);
        info!("Form '{}' reordered fields (version {})", form.id, form.version);
        Ok(form.clone())
    }

    /// Validates answers against the form's current schema and records an
    /// immutable submission snapshot.
    pub fn submit(
        &self,
        form_id: &Uuid,
        answers: &JsonMap<String, Value>,
        meta: SubmissionMeta,
    ) -> FormFoldResult<Submission> {
        let form = self.get_form(form_id)?;
        let sanitized = validate_submission(&form.fields, answers)?;
        let submission = Submission::new(&form, sanitized, meta);

        let mut submissions = self
            .submissions
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire submission lock".to_string()))?;
        submissions
            .entry(form.id)
            .or_default()
            .push(submission.clone());
        info!(
            "Recorded submission {} for form '{}' (version {})",
            submission.id, form.id, form.version
        );
        Ok(submission)
    }

    /// Pages through submissions, newest first. `page` is 1-based; a zero
    /// `page_size` falls back to the default, and sizes are clamped to the
    /// maximum.
    pub fn list_submissions(
        &self,
        form_id: Option<&Uuid>,
        page: usize,
        page_size: usize,
    ) -> FormFoldResult<SubmissionPage> {
        let page = page.max(1);
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };

        let submissions = self
            .submissions
            .lock()
            .map_err(|_| FormFoldError::Other("Failed to acquire submission lock".to_string()))?;
        let mut items: Vec<Submission> = match form_id {
            Some(id) => submissions.get(id).cloned().unwrap_or_default(),
            None => submissions.values().flatten().cloned().collect(),
        };
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = items.len();
        let items = items
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(SubmissionPage {
            page,
            page_size,
            total,
            items,
        })
    }
}

impl Default for FormManager {
    fn default() -> Self {
        Self::new()
    }
}
