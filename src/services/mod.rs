//! Business rules. Services depend only on the repository traits in
//! [`crate::domain`], never on a concrete storage adapter.

pub mod todo;
pub mod user;

pub use todo::{NewTodo, TodoService};
pub use user::{AuthError, AuthResult, UserService};
