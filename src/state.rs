use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::JwtManager;
use crate::error::AppError;
use crate::routes;
use crate::services::{TodoService, UserService};

/// Largest accepted JSON body.
pub const JSON_LIMIT: usize = 64 * 1024;

/// Everything the handlers need, built once in `main` (or a test) and
/// cloned into every worker.
#[derive(Clone)]
pub struct AppState {
    pub todos: web::Data<TodoService>,
    pub users: web::Data<UserService>,
    pub tokens: web::Data<JwtManager>,
}

impl AppState {
    pub fn new(todos: TodoService, users: UserService, tokens: Arc<JwtManager>) -> Self {
        Self {
            todos: web::Data::new(todos),
            users: web::Data::new(users),
            tokens: web::Data::from(tokens),
        }
    }

    /// Registers shared state, JSON handling and the route table.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.todos.clone())
            .app_data(self.users.clone())
            .app_data(self.tokens.clone())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_LIMIT)
                    .error_handler(json_error),
            )
            .configure(routes::config);
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected JSON body: {}", err);
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}
