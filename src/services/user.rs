use std::sync::Arc;

use thiserror::Error;

use crate::auth::password::{self, PasswordError};
use crate::auth::token::{JwtManager, TokenError};
use crate::domain::{DomainError, UserRepository};
use crate::models::User;

/// Failures of the registration, login and profile flows.
///
/// The first three variants are re-classifications of repository errors
/// specific to these flows; anything else passes through.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already exists")]
    EmailAlreadyExists,
    /// Deliberately covers both "no such email" and "wrong password".
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// A freshly minted token with the account it was minted for.
#[derive(Debug)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<JwtManager>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: Arc<JwtManager>) -> Self {
        Self {
            repo,
            tokens,
            hash_cost: password::DEFAULT_COST,
        }
    }

    /// Overrides the bcrypt work factor. Only tests should need this.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Creates an account and returns a token for it.
    ///
    /// The email lookup up front only produces the friendly error early;
    /// the storage uniqueness constraint is what actually prevents
    /// duplicates when two registrations race.
    ///
    /// Passwords longer than bcrypt's 72-byte input are `InvalidInput`.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        if !password::fits_bcrypt(password) {
            return Err(DomainError::InvalidInput.into());
        }

        match self.repo.find_by_email(email).await {
            Ok(_) => return Err(AuthError::EmailAlreadyExists),
            Err(DomainError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let hashed = password::hash_password(password, self.hash_cost).await?;
        let user = self
            .repo
            .create(User::new(email, hashed))
            .await
            .map_err(|e| match e {
                DomainError::DuplicateEntry => AuthError::EmailAlreadyExists,
                other => other.into(),
            })?;

        let token = self.tokens.generate_token(user.id, &user.email)?;
        log::info!("registered user {}", user.id);
        Ok(AuthResult { token, user })
    }

    /// Checks credentials and returns a token on success.
    ///
    /// A password bcrypt could not have hashed in full can never be right.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        if !password::fits_bcrypt(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self.repo.find_by_email(email).await.map_err(|e| match e {
            DomainError::NotFound => AuthError::InvalidCredentials,
            other => other.into(),
        })?;

        if !password::verify_password(password, user.password_hash()).await? {
            log::debug!("password mismatch for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.generate_token(user.id, &user.email)?;
        Ok(AuthResult { token, user })
    }

    /// Loads the account of an already authenticated caller.
    pub async fn get_profile(&self, user_id: i32) -> Result<User, AuthError> {
        self.repo.find_by_id(user_id).await.map_err(|e| match e {
            DomainError::NotFound => AuthError::UserNotFound,
            other => other.into(),
        })
    }
}
