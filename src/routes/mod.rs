pub mod auth;
pub mod health;
pub mod todos;

use actix_web::web;

use crate::auth::AuthMiddleware;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health).service(
        web::scope("/api/v1")
            .service(
                web::scope("/todos")
                    .service(todos::get_todos)
                    .service(todos::create_todo)
                    .service(todos::get_todo)
                    .service(todos::update_todo)
                    .service(todos::delete_todo),
            )
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login)
                    .service(
                        web::resource("/profile")
                            .wrap(AuthMiddleware)
                            .route(web::get().to(auth::profile)),
                    ),
            ),
    );
}
