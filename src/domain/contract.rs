use async_trait::async_trait;

use super::error::DomainResult;
use crate::models::{Todo, User};

/// Persistence operations for todo items.
///
/// `find_by_id`, `update` and `delete` report [`DomainError::NotFound`] when
/// no row matches; every operation reports
/// [`DomainError::DatabaseOperation`] on unexpected storage failure.
///
/// [`DomainError::NotFound`]: super::DomainError::NotFound
/// [`DomainError::DatabaseOperation`]: super::DomainError::DatabaseOperation
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persist an unsaved todo and return it with its assigned id.
    async fn create(&self, todo: Todo) -> DomainResult<Todo>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Todo>;

    /// All todos, most recently created first.
    async fn find_all(&self) -> DomainResult<Vec<Todo>>;

    /// Replace every stored field of the todo keyed by `todo.id`.
    async fn update(&self, todo: &Todo) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}

/// Persistence operations for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist an unsaved user. Fails with `DuplicateEntry` when the email is
    /// already taken.
    async fn create(&self, user: User) -> DomainResult<User>;

    async fn find_by_email(&self, email: &str) -> DomainResult<User>;

    async fn find_by_id(&self, id: i32) -> DomainResult<User>;
}
