use super::db::Db;
use super::query::{Insert, Select, Update};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TAG_COLUMNS: [&str; 5] = ["id", "uuid", "name", "description", "is_active"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<i64>,
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Tag storage and the task_tags link table.
pub struct Tags {
    db: Db,
}

impl Tags {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Creates a tag, or reactivates a deactivated one with the same
    /// name. An active duplicate is an error.
    pub fn insert(&self, name: &str, description: Option<String>) -> Result<Tag> {
        if let Some(existing) = self.get_by_name(name)? {
            if existing.is_active {
                return Err(msg_error_anyhow!(Message::TagAlreadyExists(name.to_string())));
            }
            let query = Update::new("tags")?
                .set(&[("is_active", true.into())])?
                .filter(&[("id", existing.id.into())])?;
            self.db.execute(&query)?;
            return Ok(Tag { is_active: true, ..existing });
        }
        let query = Insert::new("tags")?.values(&[
            ("uuid", Uuid::new_v4().to_string().into()),
            ("name", name.into()),
            ("description", description.into()),
        ])?;
        let id = self.db.insert(&query)?;
        self.get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::TagNotFound(name.to_string())))
    }

    /// Active tags, alphabetical.
    pub fn fetch(&self) -> Result<Vec<Tag>> {
        let query = Select::new("tags")?
            .filter(&[("is_active", true.into())])?
            .order_by("name", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Tag>> {
        let query = Select::new("tags")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let query = Select::new("tags")?.filter(&[("name", name.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_or_create(&self, name: &str) -> Result<Tag> {
        match self.get_by_name(name)? {
            Some(tag) if tag.is_active => Ok(tag),
            _ => self.insert(name, None),
        }
    }

    /// Active tags attached to one task, alphabetical.
    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Tag>> {
        let qualified: Vec<String> = TAG_COLUMNS.iter().map(|column| format!("tags.{}", column)).collect();
        let columns: Vec<&str> = qualified.iter().map(String::as_str).collect();
        let query = Select::new("tags")?
            .columns(&columns)?
            .join("INNER", "task_tags", "tags.id", "task_tags.tag_id")?
            .filter(&[("task_tags.task_id", task_id.into()), ("tags.is_active", true.into())])?
            .order_by("tags.name", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    /// Hides the tag from listings. Existing task links stay in place.
    pub fn deactivate(&self, name: &str) -> Result<()> {
        let Some(tag) = self.get_by_name(name)? else {
            return Err(msg_error_anyhow!(Message::TagNotFound(name.to_string())));
        };
        let query = Update::new("tags")?
            .set(&[("is_active", false.into())])?
            .filter(&[("id", tag.id.into())])?;
        self.db.execute(&query)?;
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Tag> {
        Ok(Tag {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_active: row.get("is_active")?,
        })
    }
}
