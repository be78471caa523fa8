use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JwtConfig;

/// The only algorithm tokens are signed with or accepted under.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user id rendered as a string.
    pub sub: String,
    pub user_id: i32,
    pub email: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Not valid before, seconds since epoch.
    pub nbf: i64,
    /// Expiration, seconds since epoch.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Mints and verifies HMAC-signed bearer tokens.
///
/// Stateless: there is no revocation list, expiry is the only way a token
/// stops being accepted.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl JwtManager {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, Duration::hours(config.expiry_hours))
    }

    /// Generates a signed token asserting `user_id` and `email`, valid from
    /// now until now + the configured TTL.
    pub fn generate_token(&self, user_id: i32, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_owned(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// Tokens signed with any algorithm other than HS256 are rejected as
    /// invalid, as are tampered or malformed tokens. Only a token with a good
    /// signature whose `exp` has passed yields [`TokenError::ExpiredToken`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SECRET: &str = "test_secret_for_tokens";

    fn sign(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_at(exp: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "2".to_string(),
            user_id: 2,
            email: "expired@example.com".to_string(),
            iat: now - 7200,
            nbf: now - 7200,
            exp,
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let manager = JwtManager::new(SECRET, Duration::hours(24));
        let token = manager.generate_token(1, "user@example.com").unwrap();
        let claims = manager.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let manager = JwtManager::new(SECRET, Duration::seconds(1));
        let token = manager.generate_token(7, "ttl@example.com").unwrap();

        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);

        thread::sleep(std::time::Duration::from_millis(2100));

        assert!(matches!(
            manager.verify_token(&token),
            Err(TokenError::ExpiredToken)
        ));
    }

    #[test]
    fn test_token_expiration() {
        let manager = JwtManager::new(SECRET, Duration::hours(1));
        let expired = sign(
            &claims_expiring_at(Utc::now().timestamp() - 3600),
            Algorithm::HS256,
            SECRET,
        );

        assert!(matches!(
            manager.verify_token(&expired),
            Err(TokenError::ExpiredToken)
        ));
    }

    #[test]
    fn test_other_secret_is_invalid_not_expired() {
        let manager = JwtManager::new(SECRET, Duration::hours(1));

        let fresh = JwtManager::new("a_completely_different_secret", Duration::hours(1))
            .generate_token(3, "other@example.com")
            .unwrap();
        assert!(matches!(
            manager.verify_token(&fresh),
            Err(TokenError::InvalidToken)
        ));

        // Signature is checked before expiry.
        let stale = sign(
            &claims_expiring_at(Utc::now().timestamp() - 3600),
            Algorithm::HS256,
            "a_completely_different_secret",
        );
        assert!(matches!(
            manager.verify_token(&stale),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_algorithm_substitution() {
        let manager = JwtManager::new(SECRET, Duration::hours(1));
        let claims = claims_expiring_at(Utc::now().timestamp() + 3600);
        let hs384 = sign(&claims, Algorithm::HS384, SECRET);

        assert!(matches!(
            manager.verify_token(&hs384),
            Err(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_rejects_tampered_and_malformed_tokens() {
        let manager = JwtManager::new(SECRET, Duration::hours(1));
        let token = manager.generate_token(4, "tamper@example.com").unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = sign(
            &claims_expiring_at(Utc::now().timestamp() + 3600),
            Algorithm::HS256,
            "forger",
        );
        let forged_parts: Vec<&str> = forged_payload.split('.').collect();
        parts[1] = forged_parts[1];
        let tampered = parts.join(".");

        assert!(matches!(
            manager.verify_token(&tampered),
            Err(TokenError::InvalidToken)
        ));
        assert!(matches!(
            manager.verify_token("not-a-jwt"),
            Err(TokenError::InvalidToken)
        ));
    }
}
