pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserResponse;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{Claims, JwtManager, TokenError};

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email, length(max = 255))]
    pub email: String,
    /// User's password. Must not be empty. Over-long passwords are not
    /// rejected here so that they fail like any other wrong password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    /// Must be a valid email format, at most 255 characters.
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long and at most 72 bytes.
    #[validate(length(min = 6), custom = "password::validate_password_bytes")]
    pub password: String,
}

/// Response body after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token for subsequent requests.
    pub token: String,
    pub user: UserResponse,
}
