use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::EntityRef;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(status: &str) -> Option<Self> {
        match status {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "cancelled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn from_str(priority: &str) -> Option<Self> {
        match priority {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskFilter {
    pub id: Option<u32>,
    pub assigned_to: Option<u32>,
    pub status: Option<TaskStatus>,
    pub related_to: Option<EntityRef>,
}

/// A task is always attached to an event or a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub assigned_to: u32,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub related_to: EntityRef,
}

impl Task {
    pub fn is_open(&self) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress)
    }

    /// An open task with a due date in the past is overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, due: NaiveDate) -> Task {
        Task {
            id: 1,
            title: "prepare room".to_string(),
            description: "".to_string(),
            due_date: due,
            assigned_to: 1,
            status,
            priority: TaskPriority::Medium,
            related_to: EntityRef::Event(1),
        }
    }

    #[test]
    fn test_task_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(task(TaskStatus::Pending, due).is_overdue(today));
        assert!(!task(TaskStatus::Completed, due).is_overdue(today));
        assert!(!task(TaskStatus::Pending, today).is_overdue(today));
    }
}
