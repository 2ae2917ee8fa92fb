use super::db::Db;
use super::query::{Insert, Select, Update};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<i64>,
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub color: Option<String>,
}

pub struct Categories {
    db: Db,
}

impl Categories {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Creates a category, or reactivates a deactivated one with the
    /// same name. An active duplicate is an error.
    pub fn insert(&self, name: &str, description: Option<String>, color: Option<String>) -> Result<Category> {
        if let Some(existing) = self.get_by_name(name)? {
            if existing.is_active {
                return Err(msg_error_anyhow!(Message::CategoryAlreadyExists(name.to_string())));
            }
            let query = Update::new("categories")?
                .set(&[("is_active", true.into())])?
                .filter(&[("id", existing.id.into())])?;
            self.db.execute(&query)?;
            return Ok(Category { is_active: true, ..existing });
        }
        let query = Insert::new("categories")?.values(&[
            ("uuid", Uuid::new_v4().to_string().into()),
            ("name", name.into()),
            ("description", description.into()),
            ("color", color.into()),
        ])?;
        let id = self.db.insert(&query)?;
        self.get_by_id(id)?
            .ok_or_else(|| msg_error_anyhow!(Message::CategoryNotFound(name.to_string())))
    }

    /// Active categories, alphabetical.
    pub fn fetch(&self) -> Result<Vec<Category>> {
        let query = Select::new("categories")?
            .filter(&[("is_active", true.into())])?
            .order_by("name", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let query = Select::new("categories")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        let query = Select::new("categories")?.filter(&[("name", name.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_or_create(&self, name: &str) -> Result<Category> {
        match self.get_by_name(name)? {
            Some(category) if category.is_active => Ok(category),
            _ => self.insert(name, None, None),
        }
    }

    /// Hides the category from listings. Tasks keep their category_id.
    pub fn deactivate(&self, name: &str) -> Result<()> {
        let Some(category) = self.get_by_name(name)? else {
            return Err(msg_error_anyhow!(Message::CategoryNotFound(name.to_string())));
        };
        let query = Update::new("categories")?
            .set(&[("is_active", false.into())])?
            .filter(&[("id", category.id.into())])?;
        self.db.execute(&query)?;
        Ok(())
    }

    fn map_row(row: &Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get("id")?,
            uuid: row.get("uuid")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_active: row.get("is_active")?,
            color: row.get("color")?,
        })
    }
}
