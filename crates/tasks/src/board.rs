//! In-memory task board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, TaskId, UserId};

use crate::task::{Priority, Task, TaskStatus, validate_tasks};

/// Input for [`TaskBoard::create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee_id: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority,
            assignee_id: None,
            due_date: None,
        }
    }
}

/// Partial update; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Option<UserId>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing task list (e.g. one read back from storage).
    pub fn from_tasks(tasks: Vec<Task>) -> DomainResult<Self> {
        validate_tasks(&tasks)?;
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn create(&mut self, new: NewTask, occurred_at: DateTime<Utc>) -> DomainResult<&Task> {
        if new.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }

        let task = Task {
            id: TaskId::generate(),
            title: new.title,
            description: new.description,
            status: TaskStatus::Pending,
            priority: new.priority,
            assignee_id: new.assignee_id,
            due_date: new.due_date,
            created_at: occurred_at,
            completed_at: None,
        };
        tracing::debug!(task_id = %task.id, priority = task.priority.as_str(), "task created");

        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Apply a patch. The result must still validate, otherwise nothing changes.
    ///
    /// Moving a task into `Completed` stamps `completed_at` with `occurred_at`.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch, occurred_at: DateTime<Utc>) -> DomainResult<&Task> {
        let idx = self.index_of(id)?;
        let mut next = self.tasks[idx].clone();

        if let Some(title) = patch.title {
            next.title = title;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(status) = patch.status {
            if status == TaskStatus::Completed {
                if !next.is_completed() {
                    next.completed_at = Some(occurred_at);
                }
            } else {
                next.completed_at = None;
            }
            next.status = status;
        }
        if let Some(assignee_id) = patch.assignee_id {
            next.assignee_id = assignee_id;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }

        next.validate()?;
        self.tasks[idx] = next;
        Ok(&self.tasks[idx])
    }

    /// Flip pending <-> completed. Other statuses move to completed.
    pub fn toggle(&mut self, id: &TaskId, occurred_at: DateTime<Utc>) -> DomainResult<&Task> {
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        if task.is_completed() {
            task.status = TaskStatus::Pending;
            task.completed_at = None;
        } else {
            task.status = TaskStatus::Completed;
            task.completed_at = Some(occurred_at);
        }
        Ok(&self.tasks[idx])
    }

    pub fn complete(&mut self, id: &TaskId, occurred_at: DateTime<Utc>) -> DomainResult<&Task> {
        let idx = self.index_of(id)?;
        let task = &mut self.tasks[idx];
        if task.is_completed() {
            return Err(DomainError::conflict("task is already completed"));
        }
        task.status = TaskStatus::Completed;
        task.completed_at = Some(occurred_at);
        Ok(&self.tasks[idx])
    }

    pub fn delete(&mut self, id: &TaskId) -> DomainResult<Task> {
        let idx = self.index_of(id)?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(self.tasks.remove(idx))
    }

    fn index_of(&self, id: &TaskId) -> DomainResult<usize> {
        self.tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(DomainError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(titles: &[&str]) -> (TaskBoard, Vec<TaskId>) {
        let mut board = TaskBoard::new();
        let ids = titles
            .iter()
            .map(|t| board.create(NewTask::new(*t, Priority::Medium), Utc::now()).unwrap().id.clone())
            .collect();
        (board, ids)
    }

    #[test]
    fn create_starts_pending() {
        let (board, ids) = board_with(&["Review product listings"]);
        let task = board.get(&ids[0]).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut board = TaskBoard::new();
        let err = board.create(NewTask::new(" ", Priority::Low), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn toggle_flips_between_pending_and_completed() {
        let (mut board, ids) = board_with(&["Update inventory"]);
        let now = Utc::now();

        let task = board.toggle(&ids[0], now).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(now));

        let task = board.toggle(&ids[0], now).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn complete_twice_is_a_conflict() {
        let (mut board, ids) = board_with(&["Customer support tickets"]);
        board.complete(&ids[0], Utc::now()).unwrap();
        assert!(matches!(board.complete(&ids[0], Utc::now()), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn update_applies_only_given_fields() {
        let (mut board, ids) = board_with(&["Original"]);
        let patch = TaskPatch {
            priority: Some(Priority::Urgent),
            ..TaskPatch::default()
        };
        let task = board.update(&ids[0], patch, Utc::now()).unwrap();
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.title, "Original");
    }

    #[test]
    fn status_patch_to_completed_stamps_completion_time() {
        let (mut board, ids) = board_with(&["Ship release"]);
        let done_at = Utc::now();
        let to_completed = TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        };

        let task = board.update(&ids[0], to_completed.clone(), done_at).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.completed_at, Some(done_at));

        let later = done_at + chrono::Duration::hours(1);
        let task = board.update(&ids[0], to_completed, later).unwrap();
        assert_eq!(task.completed_at, Some(done_at));

        let reopen = TaskPatch {
            status: Some(TaskStatus::InProgress),
            ..TaskPatch::default()
        };
        let task = board.update(&ids[0], reopen, later).unwrap();
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn invalid_update_leaves_task_unchanged() {
        let (mut board, ids) = board_with(&["Keep me"]);
        let patch = TaskPatch {
            title: Some(String::new()),
            ..TaskPatch::default()
        };
        assert!(board.update(&ids[0], patch, Utc::now()).is_err());
        assert_eq!(board.get(&ids[0]).unwrap().title, "Keep me");
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut board = TaskBoard::new();
        let ghost: TaskId = "ghost".parse().unwrap();
        assert_eq!(board.delete(&ghost).unwrap_err(), DomainError::NotFound);
        assert_eq!(board.toggle(&ghost, Utc::now()).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn delete_removes_the_task() {
        let (mut board, ids) = board_with(&["a", "b"]);
        let removed = board.delete(&ids[0]).unwrap();
        assert_eq!(removed.title, "a");
        assert_eq!(board.tasks().len(), 1);
    }
}
