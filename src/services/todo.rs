use std::sync::Arc;

use crate::domain::{DomainError, TodoRepository};
use crate::models::{self, Todo, TodoPatch};

/// Input for creating a todo.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
}

/// Todo business rules on top of any [`TodoRepository`].
///
/// Errors from the repository are returned unchanged.
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// Creates a todo. The title must be non-empty and at most 255
    /// characters; the description at most 1000.
    pub async fn create(&self, input: NewTodo) -> Result<Todo, DomainError> {
        if input.title.is_empty() {
            return Err(DomainError::InvalidInput);
        }
        let todo = Todo::new(input.title, input.description);
        todo.check_fields()?;

        let created = self.repo.create(todo).await?;
        log::debug!("created todo {}", created.id);
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Todo, DomainError> {
        ensure_id(id)?;
        self.repo.find_by_id(id).await
    }

    /// Every todo, newest first. An empty list is not an error.
    pub async fn get_all(&self) -> Result<Vec<Todo>, DomainError> {
        self.repo.find_all().await
    }

    /// Applies a merge patch to an existing todo and returns the result.
    ///
    /// The merged record is checked against the same bounds as `create`.
    pub async fn update(&self, id: i32, patch: TodoPatch) -> Result<Todo, DomainError> {
        ensure_id(id)?;
        let mut todo = self.repo.find_by_id(id).await?;

        if patch.is_empty() {
            log::debug!("empty patch for todo {}, touching updated_at only", id);
        }
        patch.apply_to(&mut todo);
        todo.check_fields()?;
        todo.updated_at = models::now();

        self.repo.update(&todo).await?;
        Ok(todo)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        ensure_id(id)?;
        self.repo.delete(id).await?;
        log::debug!("deleted todo {}", id);
        Ok(())
    }
}

// `0` means "no id supplied"; storage never assigns ids below 1.
fn ensure_id(id: i32) -> Result<(), DomainError> {
    if id <= 0 {
        Err(DomainError::InvalidInput)
    } else {
        Ok(())
    }
}
