//! Data models exchanged with the backend.

mod identity;
mod task;

pub use identity::{AuthPayload, Identity, IdentityPatch, Role};
pub use task::{Assignee, Priority, StatusFilter, Task, TaskStatus, TodoItem};
