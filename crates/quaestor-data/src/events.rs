use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{EntityRef, Query, Task, TaskFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "planned",
            EventStatus::InProgress => "in_progress",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(status: &str) -> Option<Self> {
        match status {
            "planned" => Some(EventStatus::Planned),
            "in_progress" => Some(EventStatus::InProgress),
            "completed" => Some(EventStatus::Completed),
            "cancelled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventFilter {
    pub id: Option<u32>,
    pub title: Option<String>,
    pub organizer_id: Option<u32>,
    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
    pub organizer_id: u32,
    pub status: EventStatus,
}

impl Event {
    /// Get tasks attached to this event.
    pub async fn get_tasks<DB>(&self, db: &DB) -> Result<Vec<Task>>
    where
        DB: Query<Task, Filter = TaskFilter>,
    {
        let tasks = db
            .query(&TaskFilter {
                related_to: Some(EntityRef::Event(self.id)),
                ..Default::default()
            })
            .await?;
        Ok(tasks)
    }
}
