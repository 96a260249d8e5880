use shared::{NewTask, Task, TaskPatch};
use uuid::Uuid;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

/// The shared create/edit dialog form. `editing` carries the id of the
/// task being edited; `None` means the form will create.
#[derive(Debug, Default, Clone)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub editing: Option<Uuid>,
    pub title_error: Option<&'static str>,
    pub description_error: Option<&'static str>,
}

impl TaskForm {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-populates the form with the selected task's fields.
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            editing: Some(task.id),
            title_error: None,
            description_error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Requires non-empty title and description before submission is
    /// allowed. Failures set the inline field errors and return false.
    pub fn validate(&mut self) -> bool {
        self.title_error = self.title.trim().is_empty().then_some(TITLE_REQUIRED);
        self.description_error = self
            .description
            .trim()
            .is_empty()
            .then_some(DESCRIPTION_REQUIRED);
        self.title_error.is_none() && self.description_error.is_none()
    }

    pub fn draft(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            completed: self.completed,
        }
    }

    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            completed: Some(self.completed),
        }
    }
}
