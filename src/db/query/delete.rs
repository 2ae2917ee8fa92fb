//! DELETE statement builder.

use super::clause;
use super::validate;
use super::{QueryError, SqlQuery, SqlValue};

/// Builds a DELETE statement.
///
/// A delete with no conditions fails at assembly time: wiping a table
/// must be spelled out with [`Delete::force`], never reached by
/// forgetting a filter.
#[derive(Debug, Clone)]
pub struct Delete {
    table: String,
    conditions: Vec<String>,
    force: bool,
    params: Vec<(String, SqlValue)>,
}

impl Delete {
    pub fn new(table: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            conditions: Vec::new(),
            force: false,
            params: Vec::new(),
        })
    }

    /// Appends an AND-joined equality predicate per entry.
    pub fn filter(mut self, conditions: &[(&str, SqlValue)]) -> Result<Self, QueryError> {
        for (column, value) in conditions {
            clause::push_eq(&mut self.conditions, &mut self.params, "", column, value.clone())?;
        }
        Ok(self)
    }

    /// Appends a predicate with an explicit operator.
    pub fn filter_op(mut self, column: &str, operator: &str, value: SqlValue) -> Result<Self, QueryError> {
        clause::push_op(&mut self.conditions, &mut self.params, "", column, operator, value)?;
        Ok(self)
    }

    /// Appends `column IN (...)`.
    pub fn filter_in(mut self, column: &str, values: &[SqlValue]) -> Result<Self, QueryError> {
        clause::push_in(&mut self.conditions, &mut self.params, "", column, false, values)?;
        Ok(self)
    }

    /// Allows the statement to run without any conditions.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }
}

impl SqlQuery for Delete {
    fn query(&self) -> Result<String, QueryError> {
        if self.conditions.is_empty() {
            if !self.force {
                return Err(QueryError::UnconditionalDelete);
            }
            return Ok(format!("DELETE FROM {};", self.table));
        }
        Ok(format!("DELETE FROM {} WHERE {};", self.table, self.conditions.join(" AND ")))
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}
