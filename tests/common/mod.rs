#![allow(dead_code)]

use std::sync::Arc;

use actix_web::test;
use chrono::Duration;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use todoforge::auth::{AuthResponse, JwtManager};
use todoforge::response::ApiResponse;
use todoforge::services::{TodoService, UserService};
use todoforge::storage::memory::{InMemoryTodoRepository, InMemoryUserRepository};
use todoforge::AppState;

pub const TEST_SECRET: &str = "integration_test_secret";

/// Minimum bcrypt cost, to keep registration fast in tests.
pub const TEST_HASH_COST: u32 = 4;

/// App state backed by fresh in-memory repositories.
pub fn test_state() -> AppState {
    let tokens = Arc::new(JwtManager::new(TEST_SECRET, Duration::hours(1)));
    let todos = TodoService::new(Arc::new(InMemoryTodoRepository::default()));
    let users = UserService::new(Arc::new(InMemoryUserRepository::default()), tokens.clone())
        .with_hash_cost(TEST_HASH_COST);
    AppState::new(todos, users, tokens)
}

// Helper struct to hold auth details
pub struct TestUser {
    pub id: i32,
    pub token: String,
}

pub async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&bytes)
        ));
    }
    let body: ApiResponse<AuthResponse> = serde_json::from_slice(&bytes)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;
    let auth = body
        .data
        .ok_or_else(|| "Registration response had no data".to_string())?;

    Ok(TestUser {
        id: auth.user.id,
        token: auth.token,
    })
}

/// Reads a response body as the JSON envelope.
pub async fn read_envelope<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> Value {
    test::read_body_json(resp).await
}

/// Extracts and deserializes the `data` field of an envelope.
pub fn data_of<T: DeserializeOwned>(envelope: &Value) -> T {
    serde_json::from_value(envelope["data"].clone()).expect("envelope data")
}
