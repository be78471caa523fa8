use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpResponse, HttpServer};

use crate::config::ServerConfig;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Seconds in-flight requests get to finish after a shutdown signal.
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// CORS policy for the public API: any origin, bearer auth allowed.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(3600)
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::failure("Route not found", "not_found"))
}

/// Binds and runs the HTTP server until SIGINT/SIGTERM.
pub async fn run(config: &ServerConfig, state: AppState) -> std::io::Result<()> {
    log::info!(
        "starting server at {} in {:?} mode",
        config.server_url(),
        config.mode
    );

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .configure(move |cfg| state.configure(cfg))
            .default_service(web::to(not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .run()
    .await
}
