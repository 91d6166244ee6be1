//! Task tracking domain.
//!
//! Pure domain logic: tasks, priorities, tagged task results and an in-memory
//! board. Timestamps are passed in by the caller so every operation is
//! deterministic.

pub mod board;
pub mod format;
pub mod helpers;
pub mod result;
pub mod task;

pub use board::{NewTask, TaskBoard, TaskPatch};
pub use helpers::{completion_rate, filter_by_status, group_by_status, sort_by_priority};
pub use result::{ResultStatus, TaskDisplayInfo, TaskResult};
pub use task::{Priority, Task, TaskStatus, validate_tasks};
