//! SELECT statement builder.

use super::clause;
use super::validate;
use super::{QueryError, SqlQuery, SqlValue};

/// Builds a SELECT statement.
///
/// ```rust,no_run
/// use timewise::db::query::{Select, SqlQuery, SqlValue};
///
/// let query = Select::new("tasks")?
///     .columns(&["id", "name", "due_time"])?
///     .filter(&[("category_id", SqlValue::Integer(1))])?
///     .order_by("due_time", "ASC")?
///     .limit(10, 0)?;
/// assert_eq!(
///     query.query()?,
///     "SELECT id, name, due_time FROM tasks WHERE category_id = :category_id ORDER BY due_time ASC LIMIT 10;"
/// );
/// # Ok::<(), timewise::db::query::QueryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    table: String,
    columns: Vec<String>,
    joins: Vec<String>,
    conditions: Vec<String>,
    order: Vec<String>,
    limit: Option<String>,
    params: Vec<(String, SqlValue)>,
}

impl Select {
    pub fn new(table: &str) -> Result<Self, QueryError> {
        validate::validate_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            columns: Vec::new(),
            joins: Vec::new(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            params: Vec::new(),
        })
    }

    /// Restricts the projection. Without this the statement selects `*`.
    pub fn columns(mut self, columns: &[&str]) -> Result<Self, QueryError> {
        for column in columns {
            validate::validate_column(column)?;
        }
        self.columns = columns.iter().map(|c| (*c).to_string()).collect();
        Ok(self)
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

    /// Appends `column NOT IN (...)`.
    pub fn filter_not_in(mut self, column: &str, values: &[SqlValue]) -> Result<Self, QueryError> {
        clause::push_in(&mut self.conditions, &mut self.params, "", column, true, values)?;
        Ok(self)
    }

    /// Appends `column BETWEEN low AND high`.
    pub fn filter_between(mut self, column: &str, low: SqlValue, high: SqlValue) -> Result<Self, QueryError> {
        clause::push_between(&mut self.conditions, &mut self.params, "", column, false, low, high)?;
        Ok(self)
    }

    /// Appends `column NOT BETWEEN low AND high`.
    pub fn filter_not_between(mut self, column: &str, low: SqlValue, high: SqlValue) -> Result<Self, QueryError> {
        clause::push_between(&mut self.conditions, &mut self.params, "", column, true, low, high)?;
        Ok(self)
    }

    /// Appends a join clause. Accepted kinds are INNER, LEFT OUTER,
    /// RIGHT OUTER and FULL OUTER.
    pub fn join(mut self, kind: &str, table: &str, left: &str, right: &str) -> Result<Self, QueryError> {
        let kind = validate::validate_join(kind)?;
        validate::validate_identifier(table)?;
        validate::validate_column(left)?;
        validate::validate_column(right)?;
        self.joins.push(format!("{} JOIN {} ON {} = {}", kind, table, left, right));
        Ok(self)
    }

    /// Appends an ORDER BY term. `RANDOM` renders as `RANDOM()`.
    pub fn order_by(mut self, column: &str, direction: &str) -> Result<Self, QueryError> {
        validate::validate_column(column)?;
        let direction = validate::validate_order(direction)?;
        if direction == "RANDOM" {
            self.order.push("RANDOM()".to_string());
        } else {
            self.order.push(format!("{} {}", column, direction));
        }
        Ok(self)
    }

    /// Caps the result set. `count` must be positive, `offset` must not
    /// be negative; a zero offset leaves the OFFSET clause out.
    pub fn limit(mut self, count: i64, offset: i64) -> Result<Self, QueryError> {
        if count <= 0 {
            return Err(QueryError::InvalidLimit(count));
        }
        if offset < 0 {
            return Err(QueryError::InvalidOffset(offset));
        }
        self.limit = Some(if offset > 0 {
            format!("LIMIT {} OFFSET {}", count, offset)
        } else {
            format!("LIMIT {}", count)
        });
        Ok(self)
    }
}

impl SqlQuery for Select {
    fn query(&self) -> Result<String, QueryError> {
        let columns = if self.columns.is_empty() { "*".to_string() } else { self.columns.join(", ") };
        let mut sql = format!("SELECT {} FROM {}", columns, self.table);
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order.join(", "));
        }
        if let Some(limit) = &self.limit {
            sql.push(' ');
            sql.push_str(limit);
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
