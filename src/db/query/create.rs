//! Schema object builders: tables, views, indexes and triggers.
//!
//! All four statements render with `IF NOT EXISTS`, which lets the schema
//! manager re-run setup without guarding every call. Column and constraint
//! specifications validate on construction so a bad schema definition
//! fails before any statement reaches the database.

use super::validate;
use super::{QueryError, SqlQuery, SqlValue};

/// Referential action for a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkAction {
    NoAction,
    Cascade,
    SetNull,
}

impl FkAction {
    fn as_sql(self) -> &'static str {
        match self {
            FkAction::NoAction => "NO ACTION",
            FkAction::Cascade => "CASCADE",
            FkAction::SetNull => "SET NULL",
        }
    }
}

/// One column of a table definition.
///
/// Name and type are validated on construction; the flag combination is
/// checked when the column joins a [`CreateTable`]. Auto-increment
/// requires primary key, and a default value requires the column to be
/// non-nullable with a literal matching the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: String,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub nullable: bool,
    pub default: Option<SqlValue>,
}

impl ColumnSpec {
    pub fn new(name: &str, data_type: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(name)?;
        let data_type = validate::validate_data_type(data_type)?;
        Ok(Self {
            name: name.to_string(),
            data_type,
            primary_key: false,
            auto_increment: false,
            nullable: true,
            default: None,
        })
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default_value(mut self, value: SqlValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Checks cross-flag invariants that chainable setters cannot.
    fn validate(&self) -> Result<(), QueryError> {
        if self.auto_increment && !self.primary_key {
            return Err(QueryError::AutoIncrementWithoutPrimaryKey(self.name.clone()));
        }
        if let Some(default) = &self.default {
            if self.nullable {
                return Err(QueryError::DefaultOnNullable(self.name.clone()));
            }
            match (default, self.data_type.as_str()) {
                (SqlValue::Identifier(_), _) => {}
                (SqlValue::Integer(_), "INTEGER" | "NUMERIC") => {}
                (SqlValue::Real(_), "REAL" | "NUMERIC") => {}
                (SqlValue::Text(_), "TEXT") => {}
                _ => return Err(QueryError::DefaultTypeMismatch(self.name.clone(), self.data_type.clone())),
            }
        }
        Ok(())
    }

    pub(crate) fn render(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.auto_increment {
            sql.push_str(" AUTOINCREMENT");
        }
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            sql.push_str(&format!(" DEFAULT {}", default.to_literal()));
        }
        sql
    }

    /// Rendering for `ALTER TABLE ... ADD COLUMN`. SQLite rejects
    /// non-constant defaults and `NOT NULL` without a default there, so
    /// migrated columns arrive relaxed: nullable, keeping the default
    /// only when it is a plain literal.
    pub(crate) fn render_for_alter(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type);
        if let Some(default) = &self.default {
            if !matches!(default, SqlValue::Identifier(_)) {
                sql.push_str(&format!(" NOT NULL DEFAULT {}", default.to_literal()));
            }
        }
        sql
    }
}

/// A table-level foreign key constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeySpec {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    pub on_delete: FkAction,
}

impl ForeignKeySpec {
    pub fn new(column: &str, references_table: &str, references_column: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(column)?;
        validate::validate_identifier(references_table)?;
        validate::validate_identifier(references_column)?;
        Ok(Self {
            column: column.to_string(),
            references_table: references_table.to_string(),
            references_column: references_column.to_string(),
            on_delete: FkAction::NoAction,
        })
    }

    pub fn on_delete(mut self, action: FkAction) -> Self {
        self.on_delete = action;
        self
    }

    fn render(&self) -> String {
        let mut sql = format!("FOREIGN KEY ({}) REFERENCES {}({})", self.column, self.references_table, self.references_column);
        if self.on_delete != FkAction::NoAction {
            sql.push_str(&format!(" ON DELETE {}", self.on_delete.as_sql()));
        }
        sql
    }
}

/// A table-level unique constraint over one or more columns.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueSpec {
    pub columns: Vec<String>,
}

impl UniqueSpec {
    pub fn new(columns: &[&str]) -> Result<Self, QueryError> {
        if columns.is_empty() {
            return Err(QueryError::EmptyColumns);
        }
        for column in columns {
            validate::validate_identifier(column)?;
        }
        Ok(Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        })
    }

    fn render(&self) -> String {
        format!("UNIQUE ({})", self.columns.join(", "))
    }
}

/// A table-level check constraint, `CHECK (column op literal)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSpec {
    pub column: String,
    pub operator: String,
    pub value: SqlValue,
}

impl CheckSpec {
    pub fn new(column: &str, operator: &str, value: SqlValue) -> Result<Self, QueryError> {
        validate::validate_identifier(column)?;
        let operator = validate::validate_operator(operator)?;
        Ok(Self {
            column: column.to_string(),
            operator,
            value,
        })
    }

    fn render(&self) -> String {
        format!("CHECK ({} {} {})", self.column, self.operator, self.value.to_literal())
    }
}

/// Builds a CREATE TABLE statement.
///
/// Appends `created_at` and `updated_at` bookkeeping columns to every
/// table that does not declare them itself.
#[derive(Debug, Clone)]
pub struct CreateTable {
    table: String,
    columns: Vec<ColumnSpec>,
    foreign_keys: Vec<ForeignKeySpec>,
    unique: Vec<UniqueSpec>,
    checks: Vec<CheckSpec>,
    params: Vec<(String, SqlValue)>,
}

impl CreateTable {
    pub fn new(table: &str, columns: Vec<ColumnSpec>) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        if columns.is_empty() {
            return Err(QueryError::EmptyColumns);
        }
        let mut columns = columns;
        for column in &columns {
            column.validate()?;
        }
        for bookkeeping in ["created_at", "updated_at"] {
            if !columns.iter().any(|c| c.name == bookkeeping) {
                columns.push(
                    ColumnSpec::new(bookkeeping, "TEXT")?
                        .not_null()
                        .default_value(SqlValue::identifier("CURRENT_TIMESTAMP")?),
                );
            }
        }
        Ok(Self {
            table: table.to_string(),
            columns,
            foreign_keys: Vec::new(),
            unique: Vec::new(),
            checks: Vec::new(),
            params: Vec::new(),
        })
    }

    pub fn foreign_key(mut self, spec: ForeignKeySpec) -> Self {
        self.foreign_keys.push(spec);
        self
    }

    pub fn unique(mut self, spec: UniqueSpec) -> Self {
        self.unique.push(spec);
        self
    }

    pub fn check(mut self, spec: CheckSpec) -> Self {
        self.checks.push(spec);
        self
    }

    /// Declared columns, bookkeeping included. The schema manager diffs
    /// these against the live table.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }
}

impl SqlQuery for CreateTable {
    fn query(&self) -> Result<String, QueryError> {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnSpec::render).collect();
        parts.extend(self.foreign_keys.iter().map(ForeignKeySpec::render));
        parts.extend(self.unique.iter().map(UniqueSpec::render));
        parts.extend(self.checks.iter().map(CheckSpec::render));
        Ok(format!("CREATE TABLE IF NOT EXISTS {} ({});", self.table, parts.join(", ")))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}

/// Builds a CREATE VIEW statement.
///
/// The body comes from another builder and is inlined through
/// [`SqlQuery::with_parameters`], since SQLite does not accept bound
/// parameters inside a view definition.
#[derive(Debug, Clone)]
pub struct CreateView {
    name: String,
    body: String,
    params: Vec<(String, SqlValue)>,
}

impl CreateView {
    pub fn new(name: &str, body: &impl SqlQuery) -> Result<Self, QueryError> {
        validate::validate_identifier(name)?;
        let body = body.with_parameters()?.trim_end_matches(';').to_string();
        Ok(Self {
            name: name.to_string(),
            body,
            params: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SqlQuery for CreateView {
    fn query(&self) -> Result<String, QueryError> {
        Ok(format!("CREATE VIEW IF NOT EXISTS {} AS {};", self.name, self.body))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.name
    }
}

/// Builds a CREATE INDEX statement with a derived name,
/// `idx_<table>_<columns>`.
#[derive(Debug, Clone)]
pub struct CreateIndex {
    name: String,
    table: String,
    columns: Vec<String>,
    unique: bool,
    params: Vec<(String, SqlValue)>,
}

impl CreateIndex {
    pub fn new(table: &str, columns: &[&str]) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        if columns.is_empty() {
            return Err(QueryError::EmptyColumns);
        }
        for column in columns {
            validate::validate_identifier(column)?;
        }
        Ok(Self {
            name: format!("idx_{}_{}", table, columns.join("_")),
            table: table.to_string(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            unique: false,
            params: Vec::new(),
        })
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SqlQuery for CreateIndex {
    fn query(&self) -> Result<String, QueryError> {
        let verb = if self.unique { "CREATE UNIQUE INDEX" } else { "CREATE INDEX" };
        Ok(format!("{} IF NOT EXISTS {} ON {} ({});", verb, self.name, self.table, self.columns.join(", ")))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}

/// When a trigger fires relative to its statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    fn as_sql(self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
            TriggerTiming::InsteadOf => "INSTEAD OF",
        }
    }
}

/// Which statement kind a trigger reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Insert,
    Update,
    Delete,
}

impl TriggerAction {
    fn as_sql(self) -> &'static str {
        match self {
            TriggerAction::Insert => "INSERT",
            TriggerAction::Update => "UPDATE",
            TriggerAction::Delete => "DELETE",
        }
    }
}

/// Builds a CREATE TRIGGER statement.
///
/// The body is another builder's statement, inlined through
/// [`SqlQuery::with_parameters`]. Row references such as `NEW.id` enter
/// the body as [`SqlValue::Identifier`] values.
#[derive(Debug, Clone)]
pub struct CreateTrigger {
    name: String,
    table: String,
    timing: TriggerTiming,
    action: TriggerAction,
    body: String,
    params: Vec<(String, SqlValue)>,
}

impl CreateTrigger {
    pub fn new(name: &str, table: &str, timing: TriggerTiming, action: TriggerAction, body: &impl SqlQuery) -> Result<Self, QueryError> {
        validate::validate_identifier(name)?;
        validate::validate_identifier(table)?;
        let body = body.with_parameters()?;
        Ok(Self {
            name: name.to_string(),
            table: table.to_string(),
            timing,
            action,
            body,
            params: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SqlQuery for CreateTrigger {
    fn query(&self) -> Result<String, QueryError> {
        Ok(format!(
            "CREATE TRIGGER IF NOT EXISTS {} {} {} ON {} BEGIN {} END;",
            self.name,
            self.timing.as_sql(),
            self.action.as_sql(),
            self.table,
            self.body
        ))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}
