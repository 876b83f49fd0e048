use serde::Deserialize;

use crate::forms::{self, EntityForm, NumberInput};
use super::types::{TaskPayload, TaskStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub assigned_to: Option<String>,
    pub linked_to: Option<String>,
    pub linked_type: Option<String>,
    pub category: Option<String>,
    pub estimated_hours: Option<NumberInput>,
    pub actual_hours: Option<NumberInput>,
    pub is_recurring: bool,
    pub recurring_type: Option<String>,
    pub reminder_before: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub attachments: Option<Vec<String>>,
}

impl EntityForm for TaskForm {
    type Payload = TaskPayload;

    fn required_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if forms::is_blank(&self.title) {
            errors.push(forms::missing("Title"));
        }
        if self.due_date.as_deref().is_none_or(forms::is_blank) {
            errors.push(forms::missing("Due date"));
        }
        errors
    }

    fn into_payload(self) -> Result<TaskPayload, Vec<String>> {
        let mut errors = Vec::new();
        let status = match forms::text(self.status) {
            None => TaskStatus::Pending,
            Some(raw) => TaskStatus::parse(&raw).unwrap_or_else(|| {
                errors.push(format!("Unknown status '{raw}'"));
                TaskStatus::Pending
            }),
        };
        let due_date = forms::date(self.due_date.as_deref(), "Due date", &mut errors);
        let assigned_to = forms::reference(self.assigned_to.as_deref(), "Assignee", &mut errors);
        let estimated_hours = forms::number(self.estimated_hours.as_ref(), "Estimated hours", &mut errors);
        let actual_hours = forms::number(self.actual_hours.as_ref(), "Actual hours", &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskPayload {
            title: self.title.trim().to_string(),
            description: forms::text(self.description),
            priority: forms::text(self.priority).unwrap_or_else(|| "medium".to_string()),
            status,
            due_date,
            due_time: forms::text(self.due_time),
            assigned_to,
            linked_to: forms::text(self.linked_to),
            linked_type: forms::text(self.linked_type),
            category: forms::text(self.category),
            estimated_hours,
            actual_hours,
            is_recurring: self.is_recurring,
            recurring_type: forms::text(self.recurring_type),
            reminder_before: forms::text(self.reminder_before),
            notes: forms::text(self.notes),
            tags: forms::string_set(self.tags),
            attachments: forms::string_set(self.attachments),
            completed_at: None,
        })
    }
}
