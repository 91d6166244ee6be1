use std::collections::BTreeMap;

use crate::task::{Task, TaskStatus};

/// Highest priority first; equal priorities keep input order.
pub fn sort_by_priority(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));
    sorted
}

pub fn filter_by_status(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks.iter().filter(|t| t.status == status).cloned().collect()
}

/// Bucket tasks by status. Every status is present, possibly empty.
pub fn group_by_status(tasks: &[Task]) -> BTreeMap<TaskStatus, Vec<Task>> {
    let mut grouped: BTreeMap<TaskStatus, Vec<Task>> =
        TaskStatus::ALL.into_iter().map(|s| (s, Vec::new())).collect();
    for task in tasks {
        grouped.entry(task.status).or_default().push(task.clone());
    }
    grouped
}

/// Share of completed tasks as a percentage; `0.0` for an empty list.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed()).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;
    use proptest::prelude::*;

    fn task(id: &str, priority: Priority, status: TaskStatus) -> Task {
        Task {
            id: id.parse().unwrap(),
            title: format!("task {id}"),
            description: String::new(),
            status,
            priority,
            assignee_id: None,
            due_date: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn sort_by_priority_puts_urgent_first_and_is_stable() {
        let tasks = vec![
            task("a", Priority::Low, TaskStatus::Pending),
            task("b", Priority::Urgent, TaskStatus::Pending),
            task("c", Priority::Low, TaskStatus::Pending),
            task("d", Priority::High, TaskStatus::Pending),
        ];
        let sorted = sort_by_priority(&tasks);
        assert_eq!(ids(&sorted), vec!["b", "d", "a", "c"]);
        assert_eq!(ids(&tasks), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn group_by_status_has_every_bucket() {
        let tasks = vec![
            task("a", Priority::Low, TaskStatus::Completed),
            task("b", Priority::Low, TaskStatus::Pending),
        ];
        let grouped = group_by_status(&tasks);
        assert_eq!(grouped.len(), 4);
        assert!(grouped[&TaskStatus::Cancelled].is_empty());
        assert_eq!(ids(&grouped[&TaskStatus::Completed]), vec!["a"]);
    }

    #[test]
    fn completion_rate_is_a_percentage() {
        assert_eq!(completion_rate(&[]), 0.0);
        let tasks = vec![
            task("a", Priority::Low, TaskStatus::Completed),
            task("b", Priority::Low, TaskStatus::Pending),
            task("c", Priority::Low, TaskStatus::InProgress),
            task("d", Priority::Low, TaskStatus::Completed),
        ];
        assert_eq!(completion_rate(&tasks), 50.0);
        assert_eq!(ids(&filter_by_status(&tasks, TaskStatus::Completed)), vec!["a", "d"]);
    }

    proptest! {
        /// Property: grouping partitions the input without losing tasks.
        #[test]
        fn grouping_partitions_tasks(statuses in prop::collection::vec(0usize..4, 0..30)) {
            let tasks: Vec<Task> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| task(&format!("t{i}"), Priority::Medium, TaskStatus::ALL[*s]))
                .collect();
            let grouped = group_by_status(&tasks);
            let total: usize = grouped.values().map(Vec::len).sum();
            prop_assert_eq!(total, tasks.len());
            for (status, bucket) in &grouped {
                prop_assert!(bucket.iter().all(|t| t.status == *status));
            }
        }
    }
}
