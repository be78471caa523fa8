//! Domain vocabulary shared by every layer: the error taxonomy and the
//! repository contracts that storage adapters implement.

pub mod contract;
pub mod error;

pub use contract::{TodoRepository, UserRepository};
pub use error::DomainError;
