use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The one persisted entity: a task with a store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Create payload. Every field is optional on the wire; the store fills
/// in defaults rather than rejecting a sparse body.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Update payload. `None` means "field not supplied", which is distinct
/// from an explicit falsy value: `completed: Some(false)` overwrites.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Wire envelope for error bodies and the delete confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Task {
    /// Builds a fresh task from a create payload, assigning the id.
    pub fn create(draft: NewTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
        }
    }

    /// Merges a patch over this record. Supplied fields overwrite,
    /// omitted fields keep their prior value.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}
