use super::db::Db;
use super::query::{Insert, Select, Update};
use super::tasks::Tasks;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Option<i64>,
    pub uuid: String,
    pub task_id: i64,
    pub reminder_time: NaiveDateTime,
    pub is_active: bool,
    pub is_sent: bool,
}

pub struct Reminders {
    db: Db,
}

impl Reminders {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Attaches a reminder to an existing task.
    pub fn insert(&self, task_id: i64, reminder_time: NaiveDateTime) -> Result<Reminder> {
        if Tasks::new(&self.db).get_by_id(task_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::TaskNotFound(task_id.to_string())));
        }
        let query = Insert::new("reminders")?.values(&[
            ("uuid", Uuid::new_v4().to_string().into()),
            ("task_id", task_id.into()),
            ("reminder_time", reminder_time.into()),
        ])?;
        let id = self.db.insert(&query)?;
        self.get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::ReminderNotFound(id)))
    }

    /// Active, unsent reminders in firing order.
    pub fn fetch_pending(&self) -> Result<Vec<Reminder>> {
        let query = Select::new("pending_reminders")?.order_by("reminder_time", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Reminder>> {
        let query = Select::new("reminders")?
            .filter(&[("task_id", task_id.into())])?
            .order_by("reminder_time", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Reminder>> {
        let query = Select::new("reminders")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    /// Flags a reminder as delivered so it leaves the pending view.
    pub fn mark_sent(&self, id: i64) -> Result<()> {
        let query = Update::new("reminders")?
            .set(&[("is_sent", true.into())])?
            .filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::ReminderNotFound(id)));
        }
        Ok(())
    }

    pub fn deactivate(&self, id: i64) -> Result<()> {
        let query = Update::new("reminders")?
            .set(&[("is_active", false.into())])?
            .filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::ReminderNotFound(id)));
        }
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Reminder> {
        Ok(Reminder {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            task_id: row.get("task_id")?,
            reminder_time: row.get("reminder_time")?,
            is_active: row.get("is_active")?,
            is_sent: row.get("is_sent")?,
        })
    }
}
