use super::db::Db;
use super::query::{Insert, Select};
use anyhow::Result;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Measurement unit for countable tasks, e.g. "pages" or "km".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: Option<i64>,
    pub name: String,
    pub symbol: Option<String>,
}

pub struct Units {
    db: Db,
}

impl Units {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    pub fn get_or_create(&self, name: &str, symbol: Option<&str>) -> Result<Unit> {
        if let Some(unit) = self.get_by_name(name)? {
            return Ok(unit);
        }
        let query = Insert::new("units")?.values(&[
            ("name", name.into()),
            ("symbol", symbol.map(str::to_string).into()),
        ])?;
        let id = self.db.insert(&query)?;
        Ok(Unit {
            id: Some(id),
            name: name.to_string(),
            symbol: symbol.map(str::to_string),
        })
    }

    pub fn fetch(&self) -> Result<Vec<Unit>> {
        let query = Select::new("units")?.order_by("name", "ASC")?;
        self.db.query_rows(&query, Self::map_row)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Unit>> {
        let query = Select::new("units")?.filter(&[("id", id.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Unit>> {
        let query = Select::new("units")?.filter(&[("name", name.into())])?;
        self.db.query_one(&query, Self::map_row)
    }

    fn map_row(row: &Row) -> rusqlite::Result<Unit> {
        Ok(Unit {
            id: row.get("id")?,
            name: row.get("name")?,
            symbol: row.get("symbol")?,
        })
    }
}
