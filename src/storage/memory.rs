//! In-memory repositories for tests. Not durable and not shared across
//! processes.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    contract::{TodoRepository, UserRepository},
    DomainError,
};
use crate::models::{Todo, User};

struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> Result<MutexGuard<'_, Table<T>>, DomainError> {
    table.lock().map_err(|_| DomainError::DatabaseOperation)
}

/// Todo storage in a `Vec` behind a mutex.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    table: Mutex<Table<Todo>>,
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, mut todo: Todo) -> Result<Todo, DomainError> {
        let mut table = lock(&self.table)?;
        todo.id = table.next_id();
        table.rows.push(todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: i32) -> Result<Todo, DomainError> {
        lock(&self.table)?
            .rows
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        let mut todos = lock(&self.table)?.rows.clone();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        let mut table = lock(&self.table)?;
        let stored = table
            .rows
            .iter_mut()
            .find(|stored| stored.id == todo.id)
            .ok_or(DomainError::NotFound)?;
        *stored = todo.clone();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut table = lock(&self.table)?;
        let before = table.rows.len();
        table.rows.retain(|todo| todo.id != id);
        if table.rows.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}

/// User storage with the same email uniqueness guarantee as the
/// `users.email` unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table<User>>,
}

impl InMemoryUserRepository {
    /// Number of stored users with exactly this email.
    pub fn count_by_email(&self, email: &str) -> usize {
        self.table
            .lock()
            .map(|table| table.rows.iter().filter(|user| user.email == email).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut table = lock(&self.table)?;
        if table.rows.iter().any(|existing| existing.email == user.email) {
            return Err(DomainError::DuplicateEntry);
        }
        user.id = table.next_id();
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        lock(&self.table)?
            .rows
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, DomainError> {
        lock(&self.table)?
            .rows
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(DomainError::NotFound)
    }
}
