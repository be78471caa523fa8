use async_trait::async_trait;
use sqlx::PgPool;

use super::classify;
use crate::domain::{contract::TodoRepository, DomainError};
use crate::models::Todo;

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// PostgreSQL-backed [`TodoRepository`].
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError> {
        let sql = format!(
            "INSERT INTO todos (title, description, completed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {TODO_COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .bind(todo.created_at)
            .bind(todo.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_by_id(&self, id: i32) -> Result<Todo, DomainError> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(DomainError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, DomainError> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Todo>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE todos SET title = $1, description = $2, completed = $3, updated_at = $4 \
             WHERE id = $5",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .bind(todo.id)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}
