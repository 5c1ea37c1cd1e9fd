//! # Dashboard aggregator
//!
//! Dashboard and task-list endpoints return loosely shaped JSON: buckets may be
//! missing, `null`, or not numbers at all when the backend has no matching
//! tasks. Everything is coerced into fixed-shape records here, at the
//! boundary, so views never deal with absent values.
//!
//! Coercion rule for every count: a non-negative integer (or a float with no
//! fractional part) is taken as is, anything else becomes `0`. None of the
//! functions in this module can fail.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::{StatusFilter, Task, TaskStatus};

fn count(value: Option<&Value>) -> u64 {
    let Some(value) = value else {
        return 0;
    };
    if let Some(n) = value.as_u64() {
        return n;
    }
    match value.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            f as u64
        }
        _ => 0,
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_object().and_then(|object| object.get(key))
}

/// Tasks per status, from `taskDistribution`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

impl StatusCounts {
    pub fn from_value(value: &Value) -> Self {
        Self {
            all: count(field(value, "All")),
            pending: count(field(value, "Pending")),
            in_progress: count(field(value, "InProgress")),
            completed: count(field(value, "Completed")),
        }
    }
}

/// Tasks per priority, from `taskPriorityLevels`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl PriorityCounts {
    pub fn from_value(value: &Value) -> Self {
        Self {
            low: count(field(value, "Low")),
            medium: count(field(value, "Medium")),
            high: count(field(value, "High")),
        }
    }
}

/// Fixed-shape summary behind the dashboard cards and charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSummary {
    pub status: StatusCounts,
    pub priority: PriorityCounts,
    pub recent_tasks: Vec<Task>,
}

/// Build a summary from the `charts` object of a dashboard response.
///
/// Buckets are read from `taskDistribution` and `taskPriorityLevels`; when a
/// group is absent its buckets are looked up on `charts` itself, so a flat
/// `{"Pending": 3}` summarizes too.
pub fn summarize(charts: &Value) -> TaskSummary {
    let distribution = field(charts, "taskDistribution").unwrap_or(charts);
    let priorities = field(charts, "taskPriorityLevels").unwrap_or(charts);
    TaskSummary {
        status: StatusCounts::from_value(distribution),
        priority: PriorityCounts::from_value(priorities),
        recent_tasks: Vec::new(),
    }
}

/// One bar or slice of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub label: &'static str,
    pub count: u64,
}

impl ChartPoint {
    /// Share of `max` in whole percent, clamped to `0..=100`.
    pub fn percent_of(&self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        let share = u128::from(self.count) * 100 / u128::from(max);
        u64::try_from(share.min(100)).unwrap_or(100)
    }
}

/// Pending, In Progress, Completed.
pub fn status_series(counts: &StatusCounts) -> [ChartPoint; 3] {
    [
        ChartPoint {
            label: TaskStatus::Pending.label(),
            count: counts.pending,
        },
        ChartPoint {
            label: TaskStatus::InProgress.label(),
            count: counts.in_progress,
        },
        ChartPoint {
            label: TaskStatus::Completed.label(),
            count: counts.completed,
        },
    ]
}

/// Low, Medium, High.
pub fn priority_series(counts: &PriorityCounts) -> [ChartPoint; 3] {
    [
        ChartPoint {
            label: "Low",
            count: counts.low,
        },
        ChartPoint {
            label: "Medium",
            count: counts.medium,
        },
        ChartPoint {
            label: "High",
            count: counts.high,
        },
    ]
}

/// Headline numbers of the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_tasks: u64,
    pub pending_tasks: u64,
    pub completed_tasks: u64,
    pub overdue_tasks: u64,
}

impl Statistics {
    pub fn from_value(value: &Value) -> Self {
        Self {
            total_tasks: count(field(value, "totalTasks")),
            pending_tasks: count(field(value, "pendingTasks")),
            completed_tasks: count(field(value, "completedTasks")),
            overdue_tasks: count(field(value, "overdueTasks")),
        }
    }
}

/// A filter tab on the task list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTab {
    pub filter: StatusFilter,
    pub count: u64,
}

impl StatusTab {
    pub fn label(&self) -> &'static str {
        self.filter.label()
    }
}

/// All, Pending, In Progress, Completed, from a `statusSummary` object.
pub fn status_tabs(summary: &Value) -> Vec<StatusTab> {
    [
        (StatusFilter::All, "all"),
        (StatusFilter::Only(TaskStatus::Pending), "pendingTasks"),
        (StatusFilter::Only(TaskStatus::InProgress), "inProgressTasks"),
        (StatusFilter::Only(TaskStatus::Completed), "completedTasks"),
    ]
    .into_iter()
    .map(|(filter, key)| StatusTab {
        filter,
        count: count(field(summary, key)),
    })
    .collect()
}

/// Tasks that fail to decode are dropped rather than failing the whole page.
fn tasks(value: &Value) -> Vec<Task> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Task>(item.clone()) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed task record");
                None
            }
        })
        .collect()
}

/// Raw body of both dashboard endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default)]
    pub statistics: Value,
    #[serde(default)]
    pub charts: Value,
    #[serde(default)]
    pub recent_tasks: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Only populated by the admin endpoint; zeroes otherwise.
    pub statistics: Statistics,
    pub summary: TaskSummary,
}

impl From<DashboardPayload> for DashboardData {
    fn from(payload: DashboardPayload) -> Self {
        let mut summary = summarize(&payload.charts);
        summary.recent_tasks = tasks(&payload.recent_tasks);
        Self {
            statistics: Statistics::from_value(&payload.statistics),
            summary,
        }
    }
}

/// Raw body of the task list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListPayload {
    #[serde(default)]
    pub tasks: Value,
    #[serde(default)]
    pub status_summary: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub tabs: Vec<StatusTab>,
}

impl TaskList {
    /// Tabs are only worth showing once there is at least one task.
    pub fn show_tabs(&self) -> bool {
        self.tabs.first().is_some_and(|tab| tab.count > 0)
    }
}

impl From<TaskListPayload> for TaskList {
    fn from(payload: TaskListPayload) -> Self {
        Self {
            tasks: tasks(&payload.tasks),
            tabs: status_tabs(&payload.status_summary),
        }
    }
}

/// Derived figures shown on a task card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCardMeta {
    pub completed_todos: u32,
    pub total_todos: u32,
    pub attachments: usize,
    pub avatars: Vec<String>,
}

impl TaskCardMeta {
    pub fn of(task: &Task) -> Self {
        let counted = task.todo_checklist.iter().filter(|item| item.completed).count();
        Self {
            completed_todos: task
                .completed_todo_count
                .unwrap_or(u32::try_from(counted).unwrap_or(u32::MAX)),
            total_todos: u32::try_from(task.todo_checklist.len()).unwrap_or(u32::MAX),
            attachments: task.attachments.len(),
            avatars: task
                .assigned_to
                .iter()
                .filter_map(|assignee| assignee.avatar().map(str::to_string))
                .collect(),
        }
    }
}

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `"10 Mar 2025"`, or `"N/A"` for a missing date.
pub fn short_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// `"Monday 10 Mar 2025"`, shown under the dashboard greeting.
pub fn long_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%A %-d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_distribution_is_zero_filled() {
        let summary = summarize(&json!({ "taskDistribution": { "Pending": 3 } }));
        assert_eq!(summary.status.pending, 3);
        assert_eq!(summary.status.in_progress, 0);
        assert_eq!(summary.status.completed, 0);
        assert_eq!(summary.status.all, 0);
        assert_eq!(summary.priority, PriorityCounts::default());
    }

    #[test]
    fn test_flat_buckets_are_zero_filled() {
        let summary = summarize(&json!({ "Pending": 3 }));
        assert_eq!(summary.status.pending, 3);
        assert_eq!(summary.status.in_progress, 0);
        assert_eq!(summary.status.completed, 0);
        assert_eq!(summary.priority, PriorityCounts::default());

        let summary = summarize(&json!({ "High": 2, "Completed": 1 }));
        assert_eq!(summary.priority.high, 2);
        assert_eq!(summary.status.completed, 1);
    }

    #[test]
    fn test_summarize_never_fails() {
        for charts in [
            json!(null),
            json!([]),
            json!("charts"),
            json!({ "taskDistribution": null, "taskPriorityLevels": 7 }),
            json!({ "taskDistribution": { "Pending": -2, "InProgress": 1.5, "Completed": "4" } }),
        ] {
            let summary = summarize(&charts);
            assert_eq!(summary.status, StatusCounts::default(), "{charts}");
            assert_eq!(summary.priority, PriorityCounts::default(), "{charts}");
        }
    }

    #[test]
    fn test_whole_floats_are_counts() {
        let summary = summarize(&json!({
            "taskDistribution": { "All": 12.0, "Completed": 4 },
            "taskPriorityLevels": { "Low": 1, "Medium": 2, "High": 3 }
        }));
        assert_eq!(summary.status.all, 12);
        assert_eq!(summary.status.completed, 4);
        assert_eq!(
            priority_series(&summary.priority).map(|p| (p.label, p.count)),
            [("Low", 1), ("Medium", 2), ("High", 3)]
        );
    }

    #[test]
    fn test_status_series_order() {
        let counts = StatusCounts {
            all: 6,
            pending: 1,
            in_progress: 2,
            completed: 3,
        };
        assert_eq!(
            status_series(&counts).map(|p| (p.label, p.count)),
            [("Pending", 1), ("In Progress", 2), ("Completed", 3)]
        );
    }

    #[test]
    fn test_bar_width_never_overflows() {
        let huge = summarize(&json!({ "Pending": 1e19, "Completed": 5e18 }));
        let series = status_series(&huge.status);
        let max = series.iter().map(|p| p.count).max().unwrap_or(0);
        assert_eq!(max, 10_000_000_000_000_000_000);
        assert_eq!(
            series.map(|p| p.percent_of(max)),
            [100, 0, 50]
        );

        let point = ChartPoint { label: "Low", count: 3 };
        assert_eq!(point.percent_of(0), 0);
        assert_eq!(point.percent_of(1), 100);
    }

    #[test]
    fn test_dashboard_payload() {
        let payload: DashboardPayload = serde_json::from_value(json!({
            "statistics": { "totalTasks": 9, "pendingTasks": 4, "completedTasks": 3, "overdueTasks": null },
            "charts": { "taskDistribution": { "All": 9, "Pending": 4, "InProgress": 2, "Completed": 3 } },
            "recentTasks": [
                { "_id": "t-1", "title": "Ship", "priority": "High", "status": "Pending" },
                { "_id": "t-2", "title": "Broken", "priority": "Urgent", "status": "Pending" }
            ]
        }))
        .unwrap();

        let data = DashboardData::from(payload);
        assert_eq!(data.statistics.total_tasks, 9);
        assert_eq!(data.statistics.overdue_tasks, 0);
        assert_eq!(data.summary.status.in_progress, 2);
        assert_eq!(data.summary.recent_tasks.len(), 1);
        assert_eq!(data.summary.recent_tasks[0].id, "t-1");
    }

    #[test]
    fn test_empty_dashboard_payload() {
        let payload: DashboardPayload = serde_json::from_value(json!({})).unwrap();
        let data = DashboardData::from(payload);
        assert_eq!(data, DashboardData::default());
    }

    #[test]
    fn test_task_list_tabs() {
        let payload: TaskListPayload = serde_json::from_value(json!({
            "tasks": null,
            "statusSummary": { "all": 5, "pendingTasks": 2, "completedTasks": 3 }
        }))
        .unwrap();
        let list = TaskList::from(payload);

        assert!(list.tasks.is_empty());
        assert!(list.show_tabs());
        assert_eq!(
            list.tabs
                .iter()
                .map(|tab| (tab.label(), tab.count))
                .collect::<Vec<_>>(),
            vec![("All", 5), ("Pending", 2), ("In Progress", 0), ("Completed", 3)]
        );

        let empty = TaskList::from(TaskListPayload::default());
        assert!(!empty.show_tabs());
    }

    #[test]
    fn test_card_meta() {
        let task: Task = serde_json::from_value(json!({
            "_id": "t-1",
            "title": "Ship",
            "priority": "Medium",
            "status": "In Progress",
            "attachments": ["a", "b"],
            "assignedTo": [
                { "_id": "u-1", "profileImageUrl": "http://img/1.png" },
                { "_id": "u-2", "profileImageUrl": "" },
                "u-3"
            ],
            "todoChecklist": [
                { "text": "one", "completed": true },
                { "text": "two" },
                { "text": "three", "completed": true }
            ]
        }))
        .unwrap();

        let meta = TaskCardMeta::of(&task);
        assert_eq!(meta.completed_todos, 2);
        assert_eq!(meta.total_todos, 3);
        assert_eq!(meta.attachments, 2);
        assert_eq!(meta.avatars, vec!["http://img/1.png".to_string()]);

        let reported = Task {
            completed_todo_count: Some(1),
            ..task
        };
        assert_eq!(TaskCardMeta::of(&reported).completed_todos, 1);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_short_date() {
        let date = "2025-03-10T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(short_date(Some(date)), "10 Mar 2025");
        assert_eq!(short_date(None), "N/A");
    }

    #[test]
    fn test_long_date() {
        let date = "2025-03-10T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(long_date(&date), "Monday 10 Mar 2025");
        let date = "2025-03-02T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(long_date(&date), "Sunday 2 Mar 2025");
    }
}
