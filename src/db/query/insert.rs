//! INSERT statement builder.

use super::clause;
use super::validate;
use super::{QueryError, SqlQuery, SqlValue};

/// Builds an INSERT statement.
///
/// `or_ignore()` switches the verb to `INSERT OR IGNORE`, which is how
/// seed rows and association rows stay idempotent.
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    or_ignore: bool,
    params: Vec<(String, SqlValue)>,
}

impl Insert {
    pub fn new(table: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            columns: Vec::new(),
            or_ignore: false,
            params: Vec::new(),
        })
    }

    /// Appends column/value pairs to the row being inserted.
    pub fn values(mut self, values: &[(&str, SqlValue)]) -> Result<Self, QueryError> {
        for (column, value) in values {
            validate::validate_identifier(column)?;
            let name = clause::placeholder_name(&self.params, "", column);
            self.columns.push((*column).to_string());
            self.params.push((name, value.clone()));
        }
        Ok(self)
    }

    /// Makes the statement a no-op when it would violate a unique
    /// constraint.
    pub fn or_ignore(mut self) -> Self {
        self.or_ignore = true;
        self
    }
}

impl SqlQuery for Insert {
    fn query(&self) -> Result<String, QueryError> {
        if self.columns.is_empty() {
            return Err(QueryError::EmptyColumns);
        }
        let placeholders: Vec<String> = self.params.iter().map(|(name, _)| format!(":{}", name)).collect();
        let verb = if self.or_ignore { "INSERT OR IGNORE" } else { "INSERT" };
        Ok(format!(
            "{} INTO {} ({}) VALUES ({});",
            verb,
            self.table,
            self.columns.join(", "),
            placeholders.join(", ")
        ))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}
