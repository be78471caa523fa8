use bcrypt::{hash, verify};
use thiserror::Error;
use tokio::task;
use validator::ValidationError;

/// Work factor used for new password hashes.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("password worker failed: {0}")]
    Worker(#[from] task::JoinError),
    #[error("password is longer than 72 bytes")]
    TooLong,
}

/// Whether bcrypt would see all of `password`.
pub fn fits_bcrypt(password: &str) -> bool {
    password.len() <= MAX_PASSWORD_BYTES
}

/// `validator` hook for request bodies carrying a new password.
pub fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if fits_bcrypt(password) {
        Ok(())
    } else {
        Err(ValidationError::new("password_too_long"))
    }
}

/// Hashes `password` with a fresh salt on the blocking thread pool.
///
/// Passwords bcrypt would truncate are refused.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    if !fits_bcrypt(password) {
        return Err(PasswordError::TooLong);
    }
    let password = password.to_owned();
    let hashed = task::spawn_blocking(move || hash(password, cost)).await??;
    Ok(hashed)
}

/// Checks `password` against a stored bcrypt hash on the blocking thread pool.
///
/// `Ok(false)` means the password does not match; an `Err` means the stored
/// hash itself could not be used. A password longer than bcrypt can see
/// never matches.
pub async fn verify_password(password: &str, hashed_password: &str) -> Result<bool, PasswordError> {
    if !fits_bcrypt(password) {
        return Ok(false);
    }
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();
    let matches = task::spawn_blocking(move || verify(password, &hashed_password)).await??;
    Ok(matches)
}
