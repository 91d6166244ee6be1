//! Tagged task results.
//!
//! A result is exactly one of success, loading or failed; consumers match on
//! it exhaustively instead of probing optional fields.

use serde::{Deserialize, Serialize};

use storefront_core::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaskResult {
    Success {
        id: TaskId,
        title: String,
        #[serde(rename = "completedAt")]
        completed_at: String,
    },
    Loading,
    Failed {
        error: String,
    },
}

/// Status badge shown next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDisplayInfo {
    pub title: String,
    pub status: ResultStatus,
    pub message: String,
}

impl TaskResult {
    pub fn display_info(&self) -> TaskDisplayInfo {
        match self {
            TaskResult::Success { title, completed_at, .. } => TaskDisplayInfo {
                title: title.clone(),
                status: ResultStatus::Completed,
                message: format!("Completed on {completed_at}"),
            },
            TaskResult::Loading => TaskDisplayInfo {
                title: "Loading...".to_string(),
                status: ResultStatus::Pending,
                message: "Please wait".to_string(),
            },
            TaskResult::Failed { error } => TaskDisplayInfo {
                title: "Task failed".to_string(),
                status: ResultStatus::Failed,
                message: error.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_display_info() {
        let success = TaskResult::Success {
            id: "t1".parse().unwrap(),
            title: "Update inventory".to_string(),
            completed_at: "2024-03-09".to_string(),
        };
        assert_eq!(success.display_info().status, ResultStatus::Completed);
        assert_eq!(success.display_info().message, "Completed on 2024-03-09");

        assert_eq!(TaskResult::Loading.display_info().title, "Loading...");

        let failed = TaskResult::Failed { error: "timeout".to_string() };
        let info = failed.display_info();
        assert_eq!(info.status, ResultStatus::Failed);
        assert_eq!(info.message, "timeout");
    }

    #[test]
    fn wire_form_is_tagged_by_kind() {
        let json = serde_json::to_value(TaskResult::Failed { error: "boom".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "failed", "error": "boom" }));

        let loading: TaskResult = serde_json::from_str(r#"{"kind":"loading"}"#).unwrap();
        assert_eq!(loading, TaskResult::Loading);

        assert!(serde_json::from_str::<TaskResult>(r#"{"kind":"exploded"}"#).is_err());
    }
}
