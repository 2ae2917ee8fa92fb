//! SQL statement builders with validated input.
//!
//! Every statement the application sends to SQLite is assembled here from
//! checked parts. Identifiers, data types, operators, order directions and
//! join kinds are validated against strict allowlists before they become
//! statement text, and values travel as named `:placeholder` parameters
//! until the engine binds them. The one deliberate exception is
//! [`SqlQuery::with_parameters`], which inlines validated literals for the
//! positions where SQLite refuses bound parameters (view and trigger
//! bodies).
//!
//! ## Builders
//!
//! - [`Select`], [`Insert`], [`Update`], [`Delete`] for row operations
//! - [`CreateTable`], [`CreateView`], [`CreateIndex`], [`CreateTrigger`]
//!   for schema objects
//!
//! All builders are consumed-and-returned so calls chain, and every step
//! that accepts outside input returns `Result` so a malformed name fails
//! before any statement reaches the database.

mod clause;
mod create;
mod delete;
mod insert;
mod select;
mod update;
pub mod validate;

pub use create::{
    CheckSpec, ColumnSpec, CreateIndex, CreateTable, CreateTrigger, CreateView, FkAction, ForeignKeySpec, TriggerAction, TriggerTiming, UniqueSpec,
};
pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

use chrono::NaiveDateTime;
use rusqlite::types::{Null, ToSqlOutput};
use rusqlite::ToSql;
use thiserror::Error;

/// Storage format for datetime columns.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while assembling a statement, before anything reaches
/// the database.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("invalid identifier: '{0}'")]
    InvalidIdentifier(String),
    #[error("invalid data type: '{0}'")]
    InvalidDataType(String),
    #[error("invalid operator: '{0}'")]
    InvalidOperator(String),
    #[error("invalid order direction: '{0}'")]
    InvalidOrder(String),
    #[error("invalid join type: '{0}'")]
    InvalidJoin(String),
    #[error("limit must be positive, got {0}")]
    InvalidLimit(i64),
    #[error("offset must not be negative, got {0}")]
    InvalidOffset(i64),
    #[error("refusing to delete without conditions; call force() to delete every row")]
    UnconditionalDelete,
    #[error("operator '{0}' takes a value list or range, use filter_in or filter_between")]
    OperatorArity(String),
    #[error("column '{0}' cannot be AUTOINCREMENT without PRIMARY KEY")]
    AutoIncrementWithoutPrimaryKey(String),
    #[error("column '{0}' has a default value but allows NULL")]
    DefaultOnNullable(String),
    #[error("default for column '{0}' does not match declared type {1}")]
    DefaultTypeMismatch(String, String),
    #[error("no columns provided")]
    EmptyColumns,
    #[error("no values provided")]
    EmptyValues,
    #[error("identifier '{0}' can only be inlined, not bound as a parameter")]
    IdentifierAsParameter(String),
}

/// A value destined for a statement, either bound as a parameter or
/// inlined as a literal.
///
/// `Identifier` is the odd one out: it names a schema object or an SQL
/// token (`CURRENT_TIMESTAMP`, `NEW.id`) rather than holding data. It is
/// validated on construction, renders verbatim when inlined and refuses
/// to be bound as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Identifier(String),
}

impl SqlValue {
    /// Creates an identifier value, rejecting anything that is not a bare
    /// or dot-qualified identifier.
    pub fn identifier(token: &str) -> Result<Self, QueryError> {
        validate::validate_column(token)?;
        Ok(SqlValue::Identifier(token.to_string()))
    }

    /// Renders the value as an inline SQL literal. Text is quoted with
    /// embedded quotes doubled, identifiers render verbatim.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(value) => value.to_string(),
            SqlValue::Real(value) => value.to_string(),
            SqlValue::Text(value) => format!("'{}'", value.replace('\'', "''")),
            SqlValue::Identifier(token) => token.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Integer(value as i64)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Text(value.format(DATETIME_FORMAT).to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => SqlValue::Null,
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlValue::Null => Ok(ToSqlOutput::from(Null)),
            SqlValue::Integer(value) => Ok(ToSqlOutput::from(*value)),
            SqlValue::Real(value) => Ok(ToSqlOutput::from(*value)),
            SqlValue::Text(value) => Ok(ToSqlOutput::from(value.as_str())),
            SqlValue::Identifier(token) => Err(rusqlite::Error::ToSqlConversionFailure(Box::new(QueryError::IdentifierAsParameter(token.clone())))),
        }
    }
}

/// Common surface of every statement builder.
pub trait SqlQuery {
    /// Finished statement text with `:name` placeholders, terminated
    /// with `;`.
    fn query(&self) -> Result<String, QueryError>;

    /// Placeholder names paired with their bound values, in the order
    /// they were added.
    fn parameters(&self) -> &[(String, SqlValue)];

    /// Name of the object the statement targets, for error context.
    fn table(&self) -> &str;

    /// Statement text with every placeholder replaced by its literal
    /// form. Only for positions where SQLite refuses bound parameters,
    /// such as view and trigger bodies; all values still went through
    /// validation on the way in.
    fn with_parameters(&self) -> Result<String, QueryError> {
        let mut text = self.query()?;
        // Longest names first so ':due' never clobbers ':due_2'.
        let mut params: Vec<&(String, SqlValue)> = self.parameters().iter().collect();
        params.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        for (name, value) in params {
            text = text.replace(&format!(":{}", name), &value.to_literal());
        }
        Ok(text)
    }
}
