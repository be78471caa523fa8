use async_trait::async_trait;
use sqlx::PgPool;

use super::classify;
use crate::domain::{contract::UserRepository, DomainError};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, password, created_at, updated_at";

/// PostgreSQL-backed [`UserRepository`]. Email uniqueness is enforced by the
/// `users.email` unique index.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let sql = format!(
            "INSERT INTO users (email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(user.password_hash())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(DomainError::NotFound)
    }

    async fn find_by_id(&self, id: i32) -> Result<User, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or(DomainError::NotFound)
    }
}
