use super::db::Db;
use super::query::{Insert, Select, Update};
use super::tasks::Tasks;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub id: Option<i64>,
    pub uuid: String,
    pub task_id: i64,
    /// Repeat interval in seconds.
    pub interval: i64,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub is_active: bool,
}

impl Recurrence {
    /// Next occurrence at or after `now`.
    ///
    /// A future start is its own next occurrence. Otherwise the elapsed
    /// interval count is rounded up and projected from the start. Yields
    /// `None` once the projection passes the end date.
    pub fn next_occurrence(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let candidate = if self.start >= now {
            self.start
        } else {
            let elapsed = (now - self.start).num_seconds();
            let steps = (elapsed + self.interval - 1) / self.interval;
            self.start + Duration::seconds(steps * self.interval)
        };
        match self.end {
            Some(end) if candidate > end => None,
            _ => Some(candidate),
        }
    }
}

pub struct Recurrences {
    db: Db,
}

impl Recurrences {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    pub fn insert(&self, task_id: i64, interval: i64, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Result<Recurrence> {
        if interval <= 0 {
            return Err(msg_error_anyhow!(Message::RecurrenceIntervalInvalid(interval)));
        }
        if Tasks::new(&self.db).get_by_id(task_id)?.is_none() {
            return Err(msg_error_anyhow!(Message::TaskNotFound(task_id.to_string())));
        }
        let query = Insert::new("recurrences")?.values(&[
            ("uuid", Uuid::new_v4().to_string().into()),
            ("task_id", task_id.into()),
            ("interval", interval.into()),
            ("start", start.into()),
            ("end", end.into()),
        ])?;
        let id = self.db.insert(&query)?;
        self.get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::RecurrenceNotFound(id)))
    }

    /// Active recurrences, oldest start first.
    pub fn fetch(&self) -> Result<Vec<Recurrence>> {
        let query = Select::new("recurrences")?
            .filter(&[("is_active", true.into())])?
            .order_by("start", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Recurrence>> {
        let query = Select::new("recurrences")?
            .filter(&[("task_id", task_id.into())])?
            .order_by("start", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Recurrence>> {
        let query = Select::new("recurrences")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    /// Moves the recurrence forward: the next occurrence relative to
    /// `now` becomes the new start. An exhausted recurrence is
    /// deactivated instead, and `None` comes back.
    pub fn advance(&self, id: i64, now: NaiveDateTime) -> Result<Option<NaiveDateTime>> {
        let Some(recurrence) = self.get_by_id(id)? else {
            return Err(msg_error_anyhow!(Message::RecurrenceNotFound(id)));
        };
        match recurrence.next_occurrence(now) {
            Some(next) => {
                let query = Update::new("recurrences")?
                    .set(&[("start", next.into())])?
                    .filter(&[("id", id.into())])?;
                self.db.execute(&query)?;
                Ok(Some(next))
            }
            None => {
                let query = Update::new("recurrences")?
                    .set(&[("is_active", false.into())])?
                    .filter(&[("id", id.into())])?;
                self.db.execute(&query)?;
                Ok(None)
            }
        }
    }

    pub fn deactivate(&self, id: i64) -> Result<()> {
        let query = Update::new("recurrences")?
            .set(&[("is_active", false.into())])?
            .filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::RecurrenceNotFound(id)));
        }
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Recurrence> {
        Ok(Recurrence {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            task_id: row.get("task_id")?,
            interval: row.get("interval")?,
            start: row.get("start")?,
            end: row.get("end")?,
            is_active: row.get("is_active")?,
        })
    }
}
