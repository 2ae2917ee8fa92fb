use super::db::Db;
use super::query::{Insert, Select, Update};
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: Option<i64>,
    pub key: String,
    pub value: String,
}

/// Key-value application settings stored next to the data they govern.
///
/// Defaults are seeded on schema setup; [`Settings::set`] upserts, so a
/// seeded value can be overridden without ceremony.
pub struct Settings {
    db: Db,
}

impl Settings {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_entry(key)?.map(|setting| setting.value))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        match self.get_entry(key)? {
            Some(_) => {
                let query = Update::new("settings")?
                    .set(&[("value", value.into())])?
                    .filter(&[("key", key.into())])?;
                self.db.execute(&query)?;
            }
            None => {
                let query = Insert::new("settings")?.values(&[("key", key.into()), ("value", value.into())])?;
                self.db.execute(&query)?;
            }
        }
        Ok(())
    }

    /// All settings, ordered by key.
    pub fn fetch(&self) -> Result<Vec<Setting>> {
        let query = Select::new("settings")?.order_by("key", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    /// Reads a setting that must hold an integer.
    pub fn get_numeric(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key)? {
            Some(value) => {
                let parsed = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| msg_error_anyhow!(Message::SettingNotNumeric(key.to_string(), value.clone())))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Allowed priority range, falling back to the seeded 0..=5.
    pub fn priority_bounds(&self) -> Result<(i64, i64)> {
        let min = self.get_numeric("priority_min")?.unwrap_or(0);
        let max = self.get_numeric("priority_max")?.unwrap_or(5);
        Ok((min, max))
    }

    fn get_entry(&self, key: &str) -> Result<Option<Setting>> {
        let query = Select::new("settings")?.filter(&[("key", key.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    fn map_row(row: &Row) -> rusqlite::Result<Setting> {
        Ok(Setting {
            id: row.get("id")?,
            key: row.get("key")?,
            value: row.get("value")?,
        })
    }
}
