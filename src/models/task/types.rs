use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<TaskStatus> {
        match raw.trim() {
            "pending" => Some(TaskStatus::Pending),
            "in-progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub linked_to: Option<String>,
    pub linked_type: Option<String>,
    pub category: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub is_recurring: bool,
    pub recurring_type: Option<String>,
    pub reminder_before: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
    pub completed_at: Option<NaiveDate>,
    pub created_by: Uuid,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::parse(&self.status).unwrap_or_default()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status() != TaskStatus::Completed && self.due_date.is_some_and(|d| d < today)
    }

    /// Status and completion date after a checkbox toggle: completed goes back
    /// to pending, anything else becomes completed today.
    pub fn toggled(&self, today: NaiveDate) -> (TaskStatus, Option<NaiveDate>) {
        match self.status() {
            TaskStatus::Completed => (TaskStatus::Pending, None),
            _ => (TaskStatus::Completed, Some(today)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub linked_to: Option<String>,
    pub linked_type: Option<String>,
    pub category: Option<String>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub is_recurring: bool,
    pub recurring_type: Option<String>,
    pub reminder_before: Option<String>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
    pub completed_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let mut stats = TaskStats { total: tasks.len(), ..TaskStats::default() };
        for task in tasks {
            match task.status() {
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Pending => {}
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        let wanted = |v: &Option<String>| {
            v.as_deref().map(str::trim).filter(|v| !v.is_empty() && *v != "all").map(String::from)
        };
        if let Some(p) = wanted(&self.priority) {
            if !task.priority.eq_ignore_ascii_case(&p) {
                return false;
            }
        }
        if let Some(s) = wanted(&self.status) {
            if task.status != s {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: &str, due: Option<NaiveDate>) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: "Call".into(),
            description: None,
            priority: "high".into(),
            status: status.into(),
            due_date: due,
            due_time: None,
            assigned_to: None,
            linked_to: None,
            linked_type: None,
            category: None,
            estimated_hours: None,
            actual_hours: None,
            is_recurring: false,
            recurring_type: None,
            reminder_before: None,
            notes: None,
            tags: Vec::new(),
            attachments: Vec::new(),
            completed_at: None,
            created_by: Uuid::new_v4(),
            company: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn stats_count_overdue_only_for_open_tasks() {
        let tasks = vec![
            task("pending", Some(day(1))),
            task("in-progress", Some(day(20))),
            task("completed", Some(day(1))),
            task("pending", None),
        ];
        let stats = TaskStats::from_tasks(&tasks, day(10));
        assert_eq!(stats, TaskStats { total: 4, in_progress: 1, completed: 1, overdue: 1 });
    }

    #[test]
    fn toggle_flips_between_completed_and_pending() {
        assert_eq!(task("pending", None).toggled(day(3)), (TaskStatus::Completed, Some(day(3))));
        assert_eq!(task("in-progress", None).toggled(day(3)), (TaskStatus::Completed, Some(day(3))));
        assert_eq!(task("completed", None).toggled(day(3)), (TaskStatus::Pending, None));
    }

    #[test]
    fn filter_by_priority_and_status() {
        let f = TaskFilter { priority: Some("high".into()), status: Some("pending".into()) };
        assert!(f.matches(&task("pending", None)));
        assert!(!f.matches(&task("completed", None)));
        assert!(TaskFilter::default().matches(&task("completed", None)));
    }
}
