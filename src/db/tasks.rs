use super::categories::Categories;
use super::db::Db;
use super::query::{Delete, Insert, Select, SqlValue, Update, DATETIME_FORMAT};
use super::settings::Settings;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use rusqlite::Row;
use uuid::Uuid;

/// Default reminder offset before the due time.
const REMINDER_BEFORE_DUE_MINUTES: i64 = 30;
/// Default reminder offset for tasks without a due time.
const REMINDER_FALLBACK_HOURS: i64 = 12;

/// Columns a caller may change through [`Tasks::update`].
pub const UPDATABLE_COLUMNS: [&str; 10] = [
    "name",
    "description",
    "start_time",
    "due_time",
    "completed_at",
    "priority",
    "count",
    "category_id",
    "parent_task_id",
    "unit_id",
];

const TASK_COLUMNS: [&str; 15] = [
    "id",
    "uuid",
    "name",
    "description",
    "start_time",
    "due_time",
    "completed_at",
    "priority",
    "count",
    "category_id",
    "parent_task_id",
    "unit_id",
    "created_at",
    "updated_at",
    "deleted_at",
];

pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Validates and stores a new task.
    ///
    /// Every task gets a fresh UUID and a default reminder: 30 minutes
    /// before the due time, or 12 hours from now when no due time is
    /// set. Task row and reminder row are written in one transaction so
    /// a task never exists without its reminder.
    pub fn insert(&self, task: &Task) -> Result<Task> {
        self.validate(task)?;
        let now = Local::now().naive_local();
        let reminder_time = match task.due_time {
            Some(due) => due - Duration::minutes(REMINDER_BEFORE_DUE_MINUTES),
            None => now + Duration::hours(REMINDER_FALLBACK_HOURS),
        };
        let insert_task = Insert::new("tasks")?.values(&[
            ("uuid", Uuid::new_v4().to_string().into()),
            ("name", task.name.as_str().into()),
            ("description", task.description.clone().into()),
            ("start_time", task.start_time.into()),
            ("due_time", task.due_time.into()),
            ("priority", task.priority.into()),
            ("count", task.count.into()),
            ("category_id", task.category_id.into()),
            ("parent_task_id", task.parent_task_id.into()),
            ("unit_id", task.unit_id.into()),
            // Local time; the column default is UTC.
            ("created_at", now.into()),
        ])?;
        let task_id = self.db.transaction(|conn| {
            let task_id = Db::insert_on(conn, &insert_task)?;
            let insert_reminder = Insert::new("reminders")?.values(&[
                ("uuid", Uuid::new_v4().to_string().into()),
                ("task_id", task_id.into()),
                ("reminder_time", reminder_time.into()),
            ])?;
            Db::insert_on(conn, &insert_reminder)?;
            Ok(task_id)
        })?;
        self.get_by_id(task_id)?
            .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(task_id.to_string())))
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let query = match filter {
            TaskFilter::All => Select::new("tasks")?,
            TaskFilter::Active => Select::new("active_tasks")?,
            TaskFilter::ByCategory(category_id) => Select::new("active_tasks")?.filter(&[("category_id", category_id.into())])?,
            TaskFilter::ByTag(tag_id) => {
                let qualified: Vec<String> = TASK_COLUMNS.iter().map(|column| format!("tasks.{}", column)).collect();
                let columns: Vec<&str> = qualified.iter().map(String::as_str).collect();
                Select::new("tasks")?
                    .columns(&columns)?
                    .join("INNER", "task_tags", "tasks.id", "task_tags.task_id")?
                    .filter(&[("task_tags.tag_id", tag_id.into())])?
                    .filter_op("tasks.deleted_at", "IS", SqlValue::Null)?
            }
            TaskFilter::ByIds(ids) => {
                let values: Vec<SqlValue> = ids.iter().map(|id| SqlValue::Integer(*id)).collect();
                Select::new("tasks")?.filter_in("id", &values)?
            }
        };
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let query = Select::new("tasks")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Task>> {
        let query = Select::new("active_tasks")?.filter(&[("name", name.into())])?.limit(1, 0)?;
        self.db.query_one(&query, Self::map_row)
    }

    /// Applies field changes to one task. Fields are named by column and
    /// checked against [`UPDATABLE_COLUMNS`]; a priority change is held
    /// to the configured bounds like on insert, and a completion time
    /// may not precede the creation time.
    pub fn update(&self, id: i64, changes: &[(&str, SqlValue)]) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let current = self
            .get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id.to_string())))?;
        for (column, value) in changes {
            if !UPDATABLE_COLUMNS.contains(column) {
                return Err(msg_error_anyhow!(Message::TaskFieldUnknown((*column).to_string())));
            }
            if *column == "priority" {
                if let SqlValue::Integer(priority) = value {
                    self.check_priority(*priority)?;
                }
            }
            if *column == "completed_at" {
                if let (SqlValue::Text(completed), Some(created)) = (value, current.created_at) {
                    let completed = NaiveDateTime::parse_from_str(completed, DATETIME_FORMAT)
                        .map_err(|_| msg_error_anyhow!(Message::TaskFieldValueInvalid("completed_at".to_string(), completed.clone())))?;
                    if completed < created {
                        return Err(msg_error_anyhow!(Message::TaskCompletedBeforeCreated));
                    }
                }
            }
        }
        let query = Update::new("tasks")?.set(changes)?.filter(&[("id", id.into())])?;
        self.db.execute(&query)?;
        Ok(())
    }

    pub fn mark_completed(&self, id: i64) -> Result<()> {
        let now = Local::now().naive_local();
        let query = Update::new("tasks")?.set(&[("completed_at", now.into())])?.filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Marks a task deleted without removing the row. Soft-deleted tasks
    /// disappear from [`TaskFilter::Active`] listings.
    pub fn soft_delete(&self, id: i64) -> Result<()> {
        let now = Local::now().naive_local();
        let query = Update::new("tasks")?.set(&[("deleted_at", now.into())])?.filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Removes the row. Reminders, recurrences and tag links cascade.
    pub fn delete(&self, id: i64) -> Result<()> {
        let query = Delete::new("tasks")?.filter(&[("id", id.into())])?;
        if self.db.execute(&query)? == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id.to_string())));
        }
        Ok(())
    }

    /// Soft-deletes every active task of one category. Returns how many
    /// were affected.
    pub fn soft_delete_by_category(&self, category_id: i64) -> Result<usize> {
        let now = Local::now().naive_local();
        let query = Update::new("tasks")?
            .set(&[("deleted_at", now.into())])?
            .filter(&[("category_id", category_id.into())])?
            .filter_op("deleted_at", "IS", SqlValue::Null)?;
        self.db.execute(&query)
    }

    pub fn add_tag(&self, task_id: i64, tag_id: i64) -> Result<()> {
        let query = Insert::new("task_tags")?
            .values(&[("task_id", task_id.into()), ("tag_id", tag_id.into())])?
            .or_ignore();
        self.db.execute(&query)?;
        Ok(())
    }

    pub fn remove_tag(&self, task_id: i64, tag_id: i64) -> Result<()> {
        let query = Delete::new("task_tags")?.filter(&[("task_id", task_id.into()), ("tag_id", tag_id.into())])?;
        self.db.execute(&query)?;
        Ok(())
    }

    fn validate(&self, task: &Task) -> Result<()> {
        if task.name.trim().is_empty() {
            return Err(msg_error_anyhow!(Message::TaskNameRequired));
        }
        if task.name.len() > NAME_MAX_LEN {
            return Err(msg_error_anyhow!(Message::TaskNameTooLong(NAME_MAX_LEN)));
        }
        if let Some(description) = &task.description {
            if description.len() > DESCRIPTION_MAX_LEN {
                return Err(msg_error_anyhow!(Message::TaskDescriptionTooLong(DESCRIPTION_MAX_LEN)));
            }
        }
        if let (Some(start), Some(due)) = (task.start_time, task.due_time) {
            if due < start {
                return Err(msg_error_anyhow!(Message::TaskDueBeforeStart));
            }
        }
        if let Some(priority) = task.priority {
            self.check_priority(priority)?;
        }
        if let Some(category_id) = task.category_id {
            match Categories::new(&self.db).get_by_id(category_id)? {
                Some(category) if category.is_active => {}
                _ => return Err(msg_error_anyhow!(Message::CategoryNotFound(category_id.to_string()))),
            }
        }
        Ok(())
    }

    fn check_priority(&self, priority: i64) -> Result<()> {
        let (min, max) = Settings::new(&self.db).priority_bounds()?;
        if priority < min || priority > max {
            return Err(msg_error_anyhow!(Message::TaskPriorityOutOfRange(priority, min, max)));
        }
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            name: row.get("name")?,
            description: row.get("description")?,
            start_time: row.get("start_time")?,
            due_time: row.get("due_time")?,
            completed_at: row.get("completed_at")?,
            priority: row.get("priority")?,
            count: row.get("count")?,
            category_id: row.get("category_id")?,
            parent_task_id: row.get("parent_task_id")?,
            unit_id: row.get("unit_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            deleted_at: row.get("deleted_at")?,
        })
    }
}
