use thiserror::Error;

/// Failure kinds carried from storage through the services.
///
/// Storage adapters classify their native errors into one of these exactly
/// once. Nothing above the adapter inspects lower-level detail, and no
/// variant carries query text or driver messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The requested entity does not exist.
    #[error("resource not found")]
    NotFound,
    /// Caller-supplied data fails a business rule.
    #[error("invalid input")]
    InvalidInput,
    /// The storage adapter hit an unexpected failure.
    #[error("database operation failed")]
    DatabaseOperation,
    /// A uniqueness constraint was violated on write.
    #[error("duplicate entry")]
    DuplicateEntry,
}

pub type DomainResult<T> = Result<T, DomainError>;
