use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::response::ApiResponse;

/// Health check endpoint
///
/// Returns the status of the API and the current timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::success(
        "Service is healthy",
        json!({
            "status": "healthy",
            "timestamp": Utc::now()
        }),
    ))
}
