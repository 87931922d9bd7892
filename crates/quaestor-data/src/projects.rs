use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{EntityRef, Query, Task, TaskFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(status: &str) -> Option<Self> {
        match status {
            "planning" => Some(ProjectStatus::Planning),
            "in_progress" => Some(ProjectStatus::InProgress),
            "completed" => Some(ProjectStatus::Completed),
            "cancelled" => Some(ProjectStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub id: Option<u32>,
    pub title: Option<String>,
    pub manager_id: Option<u32>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub manager_id: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Get tasks attached to this project.
    pub async fn get_tasks<DB>(&self, db: &DB) -> Result<Vec<Task>>
    where
        DB: Query<Task, Filter = TaskFilter>,
    {
        let tasks = db
            .query(&TaskFilter {
                related_to: Some(EntityRef::Project(self.id)),
                ..Default::default()
            })
            .await?;
        Ok(tasks)
    }

    /// A project is running between its start and (open) end date.
    pub fn is_running(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_is_running() {
        let project = Project {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            ..Default::default()
        };
        assert!(!project.is_running(NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()));
        assert!(project.is_running(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()));

        let project = Project {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 4, 1),
            ..Default::default()
        };
        assert!(project.is_running(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!project.is_running(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()));
    }
}
