//! Allowlist validation for everything that becomes statement text.
//!
//! Values are bound as parameters, but identifiers, types, operators and
//! directions have to be spliced into the statement itself. Each of them
//! passes through one of these checks first, so nothing outside the
//! allowlists below ever reaches SQLite.

use super::QueryError;

/// SQL data types a column may declare.
pub const DATA_TYPES: [&str; 5] = ["TEXT", "INTEGER", "REAL", "BLOB", "NUMERIC"];

/// Comparison operators accepted in WHERE predicates and CHECK constraints.
pub const OPERATORS: [&str; 13] = ["=", "!=", ">", "<", ">=", "<=", "LIKE", "IN", "NOT IN", "IS", "IS NOT", "BETWEEN", "NOT BETWEEN"];

/// Accepted ORDER BY directions. RANDOM renders as `RANDOM()`.
pub const ORDER_DIRECTIONS: [&str; 3] = ["ASC", "DESC", "RANDOM"];

/// Accepted join kinds.
pub const JOIN_KINDS: [&str; 4] = ["INNER", "LEFT OUTER", "RIGHT OUTER", "FULL OUTER"];

/// A bare identifier: non-empty ASCII letters, digits and underscores.
pub fn validate_identifier(name: &str) -> Result<(), QueryError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}

/// A column reference, either bare or qualified as `table.column`.
pub fn validate_column(name: &str) -> Result<(), QueryError> {
    match name.split_once('.') {
        Some((table, column)) => {
            if validate_identifier(table).is_ok() && validate_identifier(column).is_ok() {
                Ok(())
            } else {
                Err(QueryError::InvalidIdentifier(name.to_string()))
            }
        }
        None => validate_identifier(name),
    }
}

/// Checks a column data type and returns its canonical uppercase form.
pub fn validate_data_type(data_type: &str) -> Result<String, QueryError> {
    let canonical = data_type.to_uppercase();
    if DATA_TYPES.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(QueryError::InvalidDataType(data_type.to_string()))
    }
}

/// Checks an operator and returns its canonical uppercase form.
pub fn validate_operator(operator: &str) -> Result<String, QueryError> {
    let canonical = operator.to_uppercase();
    if OPERATORS.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(QueryError::InvalidOperator(operator.to_string()))
    }
}

/// Checks an ORDER BY direction and returns its canonical uppercase form.
pub fn validate_order(direction: &str) -> Result<String, QueryError> {
    let canonical = direction.to_uppercase();
    if ORDER_DIRECTIONS.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(QueryError::InvalidOrder(direction.to_string()))
    }
}

/// Checks a join kind and returns its canonical uppercase form.
pub fn validate_join(kind: &str) -> Result<String, QueryError> {
    let canonical = kind.to_uppercase();
    if JOIN_KINDS.contains(&canonical.as_str()) {
        Ok(canonical)
    } else {
        Err(QueryError::InvalidJoin(kind.to_string()))
    }
}
