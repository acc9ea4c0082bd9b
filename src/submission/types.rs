use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use uuid::Uuid;

use crate::form::types::Form;
use crate::schema::types::FieldVariant;

/// Transport-level metadata captured alongside a submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

/// An immutable record of one respondent submission.
///
/// Snapshots the schema tree and the form version at submission time, so
/// the stored answers stay interpretable after the form evolves. Never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub form_version: u64,
    pub answers: JsonMap<String, Value>,
    pub schema_snapshot: Vec<FieldVariant>,
    #[serde(default)]
    pub meta: SubmissionMeta,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    #[must_use]
    pub fn new(form: &Form, answers: JsonMap<String, Value>, meta: SubmissionMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id: form.id,
            form_version: form.version,
            answers,
            schema_snapshot: form.fields.clone(),
            meta,
            submitted_at: Utc::now(),
        }
    }
}

/// One page of a submission listing.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPage {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub items: Vec<Submission>,
}
