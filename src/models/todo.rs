use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::domain::DomainError;

/// Longest title a todo may carry, in code points.
pub const TITLE_MAX_CHARS: usize = 255;
/// Longest description a todo may carry, in code points.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Represents a todo item as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Storage-assigned identifier. `0` until the record is persisted.
    pub id: i32,
    pub title: String,
    /// May be empty.
    pub description: String,
    pub completed: bool,
    /// Set once when the todo is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an unsaved, not yet completed `Todo`.
    /// Both timestamps are set to the same instant.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = super::now();
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks the invariants every persisted todo must hold.
    pub fn check_fields(&self) -> Result<(), DomainError> {
        let title_len = self.title.chars().count();
        if title_len == 0 || title_len > TITLE_MAX_CHARS {
            return Err(DomainError::InvalidInput);
        }
        if self.description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(DomainError::InvalidInput);
        }
        Ok(())
    }
}

/// Merge patch for a todo: `None` leaves the stored field untouched.
///
/// An explicit empty `description` is a real value, distinct from absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Applies the present fields to `todo`. Timestamps are left to the caller.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Request body for creating a todo.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTodoRequest {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Optional; at most 1000 characters.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Request body for updating a todo. Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            completed: request.completed,
        }
    }
}

/// Response payload for the todo listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
    pub total: usize,
}

impl From<Vec<Todo>> for TodoList {
    fn from(todos: Vec<Todo>) -> Self {
        let total = todos.len();
        Self { todos, total }
    }
}
