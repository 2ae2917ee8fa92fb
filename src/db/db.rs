//! Persistence engine: one connection, one lock, builder-only statements.
//!
//! Every statement the application runs goes through [`Db`], which owns
//! the single SQLite connection behind an `Arc<Mutex>`. All reads and
//! writes serialize on that lock; there is no statement-level concurrency
//! and no read/write distinction. Statements arrive as [`SqlQuery`]
//! builders, never as raw strings, with two narrow exceptions documented
//! on [`Db::execute_sql`].
//!
//! Engine-level failures are logged together with the offending statement
//! text and parameter names before they propagate, and constraint
//! violations get wrapped with the affected table for context.

use crate::db::query::{validate, SqlQuery, SqlValue};
use crate::db::schema::SchemaManager;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::{Connection, Row, Statement};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "timewise.db";

/// Handle to the application database.
///
/// Cheap to clone; clones share the same connection and lock.
#[derive(Clone)]
pub struct Db {
    pub conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens the application database and brings the schema up to date.
    ///
    /// The file name comes from the database section of the config file
    /// when set, falling back to [`DB_FILE_NAME`]. Schema setup runs
    /// before the handle is returned, so every caller sees a complete
    /// schema.
    pub fn new() -> Result<Db> {
        let db = Self::open(&Self::path()?)?;
        let report = SchemaManager::new()?.setup(&db)?;
        msg_debug!(format!("Schema setup report: {:?}", report));
        Ok(db)
    }

    /// Resolves the database file path without opening it.
    pub fn path() -> Result<PathBuf> {
        let file_name = Config::read()?
            .database
            .and_then(|database| database.file_name)
            .unwrap_or_else(|| DB_FILE_NAME.to_string());
        DataStorage::new().get_path(&file_name)
    }

    /// Opens a database file without touching the schema.
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path).with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a statement and returns the number of affected rows.
    pub fn execute(&self, query: &impl SqlQuery) -> Result<usize> {
        let conn = self.conn.lock();
        Self::execute_on(&conn, query)
    }

    /// Runs an INSERT and returns the new row id.
    pub fn insert(&self, query: &impl SqlQuery) -> Result<i64> {
        let conn = self.conn.lock();
        Self::insert_on(&conn, query)
    }

    /// Runs a SELECT and maps every row.
    pub fn query_rows<T, F>(&self, query: &impl SqlQuery, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock();
        Self::query_rows_on(&conn, query, map)
    }

    /// Runs a SELECT expected to produce at most one row.
    pub fn query_one<T, F>(&self, query: &impl SqlQuery, map: F) -> Result<Option<T>>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        Ok(self.query_rows(query, map)?.into_iter().next())
    }

    /// Runs `work` inside a single transaction. The transaction commits
    /// when `work` returns `Ok` and rolls back when it returns `Err`.
    pub fn transaction<T>(&self, work: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let out = work(&tx)?;
        tx.commit()?;
        Ok(out)
    }

    /// Statement execution against an already-locked connection, used by
    /// [`Db::transaction`] closures.
    pub fn execute_on(conn: &Connection, query: &impl SqlQuery) -> Result<usize> {
        let sql = query.query()?;
        let mut stmt = conn.prepare(&sql)?;
        Self::bind(&mut stmt, query.parameters())?;
        stmt.raw_execute().map_err(|err| Self::engine_error(err, query, &sql))
    }

    /// INSERT against an already-locked connection, returning the new
    /// row id.
    pub fn insert_on(conn: &Connection, query: &impl SqlQuery) -> Result<i64> {
        Self::execute_on(conn, query)?;
        Ok(conn.last_insert_rowid())
    }

    /// SELECT against an already-locked connection.
    pub fn query_rows_on<T, F>(conn: &Connection, query: &impl SqlQuery, mut map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row) -> rusqlite::Result<T>,
    {
        let sql = query.query()?;
        let mut stmt = conn.prepare(&sql)?;
        Self::bind(&mut stmt, query.parameters())?;
        let mut rows = stmt.raw_query();
        let mut items = Vec::new();
        loop {
            match rows.next() {
                Ok(Some(row)) => items.push(map(row)?),
                Ok(None) => break,
                Err(err) => return Err(Self::engine_error(err, query, &sql)),
            }
        }
        Ok(items)
    }

    /// Runs a raw statement. Reserved for PRAGMA and `ALTER TABLE ... ADD
    /// COLUMN`, which the builders do not model; everything else goes
    /// through [`SqlQuery`].
    pub fn execute_sql(&self, sql: &str) -> Result<usize> {
        let conn = self.conn.lock();
        conn.execute(sql, []).with_context(|| format!("Failed to execute: {}", sql))
    }

    /// Column names of a live table, in declaration order.
    pub fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        validate::validate_identifier(table)?;
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let names = stmt.query_map([], |row| row.get::<_, String>(1))?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    fn bind(stmt: &mut Statement<'_>, params: &[(String, SqlValue)]) -> Result<()> {
        for (name, value) in params {
            if let Some(index) = stmt.parameter_index(&format!(":{}", name))? {
                stmt.raw_bind_parameter(index, value)?;
            }
        }
        Ok(())
    }

    fn engine_error(err: rusqlite::Error, query: &impl SqlQuery, sql: &str) -> anyhow::Error {
        let names: Vec<&str> = query.parameters().iter().map(|(name, _)| name.as_str()).collect();
        msg_debug!(Message::StatementFailed(sql.to_string(), names.join(", ")));
        if let rusqlite::Error::SqliteFailure(inner, _) = &err {
            if inner.code == rusqlite::ErrorCode::ConstraintViolation {
                return anyhow::Error::new(err).context(Message::ConstraintViolation(query.table().to_string()).to_string());
            }
        }
        anyhow::Error::new(err).context(format!("Statement failed on {}", query.table()))
    }
}
