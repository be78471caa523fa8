use std::io;
use std::sync::Arc;

use todoforge::{
    auth::JwtManager,
    config::Config,
    server,
    services::{TodoService, UserService},
    storage::{self, PgTodoRepository, PgUserRepository},
    AppState,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.server.mode.default_log_filter()),
    )
    .init();

    let pool = storage::connect(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    if config.database.auto_migrate {
        storage::migrate(&pool)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    }

    let tokens = Arc::new(JwtManager::from_config(&config.jwt));
    let todos = TodoService::new(Arc::new(PgTodoRepository::new(pool.clone())));
    let users = UserService::new(Arc::new(PgUserRepository::new(pool.clone())), tokens.clone());

    server::run(&config.server, AppState::new(todos, users, tokens)).await?;

    pool.close().await;
    log::info!("server stopped");
    Ok(())
}
