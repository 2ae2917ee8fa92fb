//! Declarative schema and the manager that reconciles it at startup.
//!
//! [`Schema::timewise`] is the single description of what the database
//! should look like: tables, indexes, views, triggers and seed rows, all
//! expressed through the statement builders. [`SchemaManager::setup`]
//! walks that description against a live database and applies whatever is
//! missing.
//!
//! Migration is additive only. Existing tables are diffed column-by-column
//! and missing columns arrive via `ALTER TABLE ... ADD COLUMN`; nothing is
//! ever dropped or renamed. Views, triggers and indexes create with
//! `IF NOT EXISTS`, and seed rows insert with `OR IGNORE`, so running
//! setup twice is a no-op and the returned [`SetupReport`] comes back all
//! zeros.

use crate::db::db::Db;
use crate::db::query::{
    CheckSpec, ColumnSpec, CreateIndex, CreateTable, CreateTrigger, CreateView, FkAction, ForeignKeySpec, Insert, QueryError, Select, SqlQuery, SqlValue,
    TriggerAction, TriggerTiming, UniqueSpec, Update,
};
use anyhow::Result;
use uuid::Uuid;

/// Name of the default category seeded into every database.
pub const DEFAULT_CATEGORY: &str = "General";

/// Settings rows seeded into every database.
pub const SETTING_SEEDS: [(&str, &str); 5] = [
    ("default_category", DEFAULT_CATEGORY),
    ("default_sort", "due_time"),
    ("display_columns", "id,name,due_time,priority,category_id"),
    ("priority_min", "0"),
    ("priority_max", "5"),
];

/// Everything the database should contain, declared up front.
pub struct Schema {
    pub tables: Vec<CreateTable>,
    pub indexes: Vec<CreateIndex>,
    pub views: Vec<CreateView>,
    pub triggers: Vec<CreateTrigger>,
    pub seeds: Vec<Insert>,
}

/// What one setup pass actually changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupReport {
    pub tables_created: usize,
    pub columns_added: usize,
    pub indexes_created: usize,
    pub views_created: usize,
    pub triggers_created: usize,
    pub seeds_inserted: usize,
}

fn id_column() -> Result<ColumnSpec, QueryError> {
    Ok(ColumnSpec::new("id", "INTEGER")?.primary_key().auto_increment())
}

fn uuid_column() -> Result<ColumnSpec, QueryError> {
    Ok(ColumnSpec::new("uuid", "TEXT")?.not_null())
}

fn is_active_column() -> Result<ColumnSpec, QueryError> {
    Ok(ColumnSpec::new("is_active", "INTEGER")?.not_null().default_value(SqlValue::Integer(1)))
}

impl Schema {
    /// The application schema.
    ///
    /// Table order matters: referenced tables come before the tables
    /// holding their foreign keys.
    pub fn timewise() -> Result<Schema, QueryError> {
        let tables = vec![
            CreateTable::new(
                "units",
                vec![id_column()?, ColumnSpec::new("name", "TEXT")?.not_null(), ColumnSpec::new("symbol", "TEXT")?],
            )?
            .unique(UniqueSpec::new(&["name"])?),
            CreateTable::new(
                "categories",
                vec![
                    id_column()?,
                    uuid_column()?,
                    ColumnSpec::new("name", "TEXT")?.not_null(),
                    ColumnSpec::new("description", "TEXT")?,
                    is_active_column()?,
                    ColumnSpec::new("color", "TEXT")?,
                ],
            )?
            .unique(UniqueSpec::new(&["name"])?),
            CreateTable::new(
                "tags",
                vec![
                    id_column()?,
                    uuid_column()?,
                    ColumnSpec::new("name", "TEXT")?.not_null(),
                    ColumnSpec::new("description", "TEXT")?,
                    is_active_column()?,
                ],
            )?
            .unique(UniqueSpec::new(&["name"])?),
            CreateTable::new(
                "tasks",
                vec![
                    id_column()?,
                    uuid_column()?,
                    ColumnSpec::new("name", "TEXT")?.not_null(),
                    ColumnSpec::new("description", "TEXT")?,
                    ColumnSpec::new("start_time", "TEXT")?,
                    ColumnSpec::new("due_time", "TEXT")?,
                    ColumnSpec::new("completed_at", "TEXT")?,
                    ColumnSpec::new("priority", "INTEGER")?,
                    ColumnSpec::new("count", "INTEGER")?,
                    ColumnSpec::new("category_id", "INTEGER")?,
                    ColumnSpec::new("parent_task_id", "INTEGER")?,
                    ColumnSpec::new("unit_id", "INTEGER")?,
                    ColumnSpec::new("deleted_at", "TEXT")?,
                ],
            )?
            .foreign_key(ForeignKeySpec::new("category_id", "categories", "id")?.on_delete(FkAction::SetNull))
            .foreign_key(ForeignKeySpec::new("parent_task_id", "tasks", "id")?.on_delete(FkAction::SetNull))
            .foreign_key(ForeignKeySpec::new("unit_id", "units", "id")?.on_delete(FkAction::SetNull))
            .unique(UniqueSpec::new(&["name", "description", "due_time"])?)
            .check(CheckSpec::new("priority", ">=", SqlValue::Integer(0))?),
            CreateTable::new(
                "task_tags",
                vec![
                    ColumnSpec::new("task_id", "INTEGER")?.not_null(),
                    ColumnSpec::new("tag_id", "INTEGER")?.not_null(),
                ],
            )?
            .foreign_key(ForeignKeySpec::new("task_id", "tasks", "id")?.on_delete(FkAction::Cascade))
            .foreign_key(ForeignKeySpec::new("tag_id", "tags", "id")?.on_delete(FkAction::Cascade))
            .unique(UniqueSpec::new(&["task_id", "tag_id"])?),
            CreateTable::new(
                "reminders",
                vec![
                    id_column()?,
                    uuid_column()?,
                    ColumnSpec::new("task_id", "INTEGER")?.not_null(),
                    ColumnSpec::new("reminder_time", "TEXT")?.not_null(),
                    is_active_column()?,
                    ColumnSpec::new("is_sent", "INTEGER")?.not_null().default_value(SqlValue::Integer(0)),
                ],
            )?
            .foreign_key(ForeignKeySpec::new("task_id", "tasks", "id")?.on_delete(FkAction::Cascade)),
            CreateTable::new(
                "recurrences",
                vec![
                    id_column()?,
                    uuid_column()?,
                    ColumnSpec::new("task_id", "INTEGER")?.not_null(),
                    ColumnSpec::new("interval", "INTEGER")?.not_null(),
                    ColumnSpec::new("start", "TEXT")?.not_null(),
                    ColumnSpec::new("end", "TEXT")?,
                    is_active_column()?,
                ],
            )?
            .foreign_key(ForeignKeySpec::new("task_id", "tasks", "id")?.on_delete(FkAction::Cascade))
            .unique(UniqueSpec::new(&["task_id", "interval", "start"])?)
            .check(CheckSpec::new("interval", ">", SqlValue::Integer(0))?),
            CreateTable::new(
                "settings",
                vec![
                    id_column()?,
                    ColumnSpec::new("key", "TEXT")?.not_null(),
                    ColumnSpec::new("value", "TEXT")?.not_null(),
                ],
            )?
            .unique(UniqueSpec::new(&["key"])?),
        ];

        let indexes = vec![
            CreateIndex::new("tasks", &["due_time"])?,
            CreateIndex::new("tasks", &["category_id"])?,
            CreateIndex::new("reminders", &["task_id"])?,
        ];

        let views = vec![
            CreateView::new("active_tasks", &Select::new("tasks")?.filter_op("deleted_at", "IS", SqlValue::Null)?)?,
            CreateView::new(
                "pending_reminders",
                &Select::new("reminders")?.filter(&[("is_active", true.into()), ("is_sent", false.into())])?,
            )?,
        ];

        let touch_updated_at = Update::new("tasks")?
            .set(&[("updated_at", SqlValue::identifier("CURRENT_TIMESTAMP")?)])?
            .filter(&[("id", SqlValue::identifier("NEW.id")?)])?;
        let triggers = vec![CreateTrigger::new(
            "touch_tasks_updated_at",
            "tasks",
            TriggerTiming::After,
            TriggerAction::Update,
            &touch_updated_at,
        )?];

        let mut seeds = vec![Insert::new("categories")?
            .values(&[
                ("uuid", Uuid::new_v4().to_string().into()),
                ("name", DEFAULT_CATEGORY.into()),
                ("description", "Default category".into()),
            ])?
            .or_ignore()];
        for (key, value) in SETTING_SEEDS {
            seeds.push(Insert::new("settings")?.values(&[("key", key.into()), ("value", value.into())])?.or_ignore());
        }

        Ok(Schema {
            tables,
            indexes,
            views,
            triggers,
            seeds,
        })
    }
}

/// Reconciles the declared schema against a live database.
pub struct SchemaManager {
    schema: Schema,
}

impl SchemaManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: Schema::timewise()?,
        })
    }

    /// Brings the database up to date and reports what changed.
    pub fn setup(&self, db: &Db) -> Result<SetupReport> {
        let mut report = SetupReport::default();

        for table in &self.schema.tables {
            if Self::object_exists(db, "table", table.table())? {
                report.columns_added += Self::reconcile_columns(db, table)?;
            } else {
                db.execute(table)?;
                report.tables_created += 1;
            }
        }

        for index in &self.schema.indexes {
            if !Self::object_exists(db, "index", index.name())? {
                db.execute(index)?;
                report.indexes_created += 1;
            }
        }

        for view in &self.schema.views {
            if !Self::object_exists(db, "view", view.name())? {
                db.execute(view)?;
                report.views_created += 1;
            }
        }

        for trigger in &self.schema.triggers {
            if !Self::object_exists(db, "trigger", trigger.name())? {
                db.execute(trigger)?;
                report.triggers_created += 1;
            }
        }

        for seed in &self.schema.seeds {
            report.seeds_inserted += db.execute(seed)?;
        }

        Ok(report)
    }

    fn object_exists(db: &Db, kind: &str, name: &str) -> Result<bool> {
        let query = Select::new("sqlite_master")?
            .columns(&["name"])?
            .filter(&[("type", kind.into()), ("name", name.into())])?;
        Ok(db.query_one(&query, |row| row.get::<_, String>(0))?.is_some())
    }

    /// Adds declared columns missing from the live table. Returns how
    /// many were added.
    fn reconcile_columns(db: &Db, table: &CreateTable) -> Result<usize> {
        let live = db.table_columns(table.table())?;
        let mut added = 0;
        for column in table.columns() {
            if !live.iter().any(|name| name == &column.name) {
                db.execute_sql(&format!("ALTER TABLE {} ADD COLUMN {};", table.table(), column.render_for_alter()))?;
                added += 1;
            }
        }
        Ok(added)
    }
}
