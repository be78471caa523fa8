#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "Todo CRUD and account registration/login over a layered design:"]
#![doc = "HTTP handlers call services, services call repository traits, and"]
#![doc = "storage adapters implement those traits. The binary (`main.rs`) wires"]
#![doc = "the PostgreSQL adapters in; tests wire in-memory ones."]

pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod storage;

pub use error::AppError;
pub use state::AppState;
