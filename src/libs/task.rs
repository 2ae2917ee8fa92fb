use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub due_time: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub priority: Option<i64>,
    pub count: Option<i64>,
    pub category_id: Option<i64>,
    pub parent_task_id: Option<i64>,
    pub unit_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(name: &str, description: Option<String>, due_time: Option<NaiveDateTime>) -> Self {
        Task {
            id: None,
            uuid: String::new(),
            name: name.to_string(),
            description,
            start_time: None,
            due_time,
            completed_at: None,
            priority: None,
            count: None,
            category_id: None,
            parent_task_id: None,
            unit_id: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    /// Every row, soft-deleted ones included.
    All,
    /// Rows without a `deleted_at` mark, read through the
    /// `active_tasks` view.
    Active,
    ByCategory(i64),
    ByTag(i64),
    ByIds(Vec<i64>),
}

/// Parses user-supplied date input, either `YYYY-MM-DD HH:MM:SS` or a
/// bare `YYYY-MM-DD` taken as midnight.
pub fn parse_datetime_input(input: &str) -> Result<NaiveDateTime> {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(datetime);
        }
    }
    Err(msg_error_anyhow!(Message::InvalidDateTimeInput(input.to_string())))
}
