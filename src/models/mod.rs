pub mod todo;
pub mod user;

use chrono::{DateTime, SubsecRound, Utc};

pub use todo::{CreateTodoRequest, Todo, TodoList, TodoPatch, UpdateTodoRequest};
pub use user::{User, UserResponse};

/// The current time at the precision `TIMESTAMPTZ` stores (microseconds), so
/// a value returned before a write equals the one read back after it.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
