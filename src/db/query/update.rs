//! UPDATE statement builder.

use super::clause;
use super::validate;
use super::{QueryError, SqlQuery, SqlValue};

/// Builds an UPDATE statement.
///
/// WHERE placeholders carry a `w_` prefix so that `set` and `filter` on
/// the same column never collide:
/// `UPDATE tasks SET name = :name WHERE name = :w_name;`.
#[derive(Debug, Clone)]
pub struct Update {
    table: String,
    assignments: Vec<String>,
    conditions: Vec<String>,
    params: Vec<(String, SqlValue)>,
}

const WHERE_PREFIX: &str = "w_";

impl Update {
    pub fn new(table: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            assignments: Vec::new(),
            conditions: Vec::new(),
            params: Vec::new(),
        })
    }

    /// Appends column assignments.
    pub fn set(mut self, values: &[(&str, SqlValue)]) -> Result<Self, QueryError> {
        for (column, value) in values {
            validate::validate_identifier(column)?;
            let name = clause::placeholder_name(&self.params, "", column);
            self.assignments.push(format!("{} = :{}", column, name));
            self.params.push((name, value.clone()));
        }
        Ok(self)
    }

    /// Appends an AND-joined equality predicate per entry.
    pub fn filter(mut self, conditions: &[(&str, SqlValue)]) -> Result<Self, QueryError> {
        for (column, value) in conditions {
            clause::push_eq(&mut self.conditions, &mut self.params, WHERE_PREFIX, column, value.clone())?;
        }
        Ok(self)
    }

    /// Appends a predicate with an explicit operator.
    pub fn filter_op(mut self, column: &str, operator: &str, value: SqlValue) -> Result<Self, QueryError> {
        clause::push_op(&mut self.conditions, &mut self.params, WHERE_PREFIX, column, operator, value)?;
        Ok(self)
    }

    /// Appends `column IN (...)`.
    pub fn filter_in(mut self, column: &str, values: &[SqlValue]) -> Result<Self, QueryError> {
        clause::push_in(&mut self.conditions, &mut self.params, WHERE_PREFIX, column, false, values)?;
        Ok(self)
    }
}

impl SqlQuery for Update {
    fn query(&self) -> Result<String, QueryError> {
        if self.assignments.is_empty() {
            return Err(QueryError::EmptyColumns);
        }
        let mut sql = format!("UPDATE {} SET {}", self.table, self.assignments.join(", "));
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        sql.push(';');
        Ok(sql)
    }

    fn parameters(&self) -> &[(String, SqlValue)] {
        &self.params
    }

    fn table(&self) -> &str {
        &self.table
    }
}
