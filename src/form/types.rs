use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::types::{FieldVariant, JsonField};

/// A form definition: a titled, versioned tree of fields.
///
/// `version` increments on every structural mutation of the tree and is the
/// optimistic-concurrency token offered to storage collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldVariant>,
    pub version: u64,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    /// Creates a new form around an already-prepared field tree.
    #[must_use]
    pub fn new(title: String, description: String, fields: Vec<FieldVariant>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            fields,
            version: 1,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to a form's metadata and/or its whole field tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<JsonField>>,
}

impl FormUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.fields.is_none()
    }
}
