//! Storage adapters for the repository contracts.
//!
//! `sqlx` errors are translated into [`DomainError`] here and nowhere else.

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod todo_repository;
pub mod user_repository;

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

pub use todo_repository::PgTodoRepository;
pub use user_repository::PgUserRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool sized from the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options: PgConnectOptions = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    log::info!("database connected");
    Ok(pool)
}

/// Brings the schema up to date.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("running migrations");
    MIGRATOR.run(pool).await
}

/// Classifies a driver error into the domain taxonomy.
pub(crate) fn classify(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::RowNotFound => DomainError::NotFound,
        sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::DuplicateEntry,
        other => {
            log::error!("database operation failed: {}", other);
            DomainError::DatabaseOperation
        }
    }
}
