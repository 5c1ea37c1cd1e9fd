//! Task records as returned by the backend.
//!
//! Tasks are read-only here. Dashboard endpoints return projections
//! (`title status priority dueDate createdAt`), so everything except the id,
//! title, status and priority falls back to a default when absent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status filter for the task list. `All` sends an empty `status` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn query_value(&self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

/// A user assigned to a task: either a bare id or a populated user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Assignee {
    Id(String),
    #[serde(rename_all = "camelCase")]
    User {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        profile_image_url: Option<String>,
    },
}

impl Assignee {
    pub fn id(&self) -> &str {
        match self {
            Assignee::Id(id) => id,
            Assignee::User { id, .. } => id,
        }
    }

    pub fn avatar(&self) -> Option<&str> {
        match self {
            Assignee::Id(_) => None,
            Assignee::User {
                profile_image_url, ..
            } => profile_image_url.as_deref().filter(|url| !url.is_empty()),
        }
    }
}

/// One checklist entry on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_to: Vec<Assignee>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub todo_checklist: Vec<TodoItem>,
    #[serde(default)]
    pub completed_todo_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_task_record() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t-1",
            "title": "Write report",
            "description": "Quarterly",
            "priority": "High",
            "status": "In Progress",
            "progress": 50,
            "createdAt": "2025-03-01T08:00:00.000Z",
            "dueDate": "2025-03-10T00:00:00.000Z",
            "assignedTo": [
                { "_id": "u-1", "name": "Bat", "email": "bat@b.com", "profileImageUrl": "http://img/u1.png" },
                "u-2"
            ],
            "attachments": ["http://files/a.pdf"],
            "todoChecklist": [
                { "text": "Draft", "completed": true },
                { "text": "Review", "completed": false }
            ],
            "completedTodoCount": 1
        }))
        .unwrap();

        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.assigned_to[0].avatar(), Some("http://img/u1.png"));
        assert_eq!(task.assigned_to[1].id(), "u-2");
        assert_eq!(task.assigned_to[1].avatar(), None);
        assert_eq!(task.todo_checklist.len(), 2);
        assert!(task.due_date.is_some());
    }

    #[test]
    fn test_dashboard_projection_defaults() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t-2",
            "title": "Call vendor",
            "priority": "Low",
            "status": "Pending"
        }))
        .unwrap();

        assert_eq!(task.description, "");
        assert_eq!(task.progress, 0);
        assert!(task.assigned_to.is_empty());
        assert!(task.attachments.is_empty());
        assert!(task.todo_checklist.is_empty());
        assert_eq!(task.completed_todo_count, None);
        assert_eq!(task.created_at, None);
    }

    #[test]
    fn test_status_filter_query_values() {
        assert_eq!(StatusFilter::All.query_value(), "");
        assert_eq!(
            StatusFilter::Only(TaskStatus::InProgress).query_value(),
            "In Progress"
        );
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }
}
