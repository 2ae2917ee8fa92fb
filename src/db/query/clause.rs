//! Shared WHERE clause assembly for the row statement builders.
//!
//! Select, Update and Delete all collect predicates the same way: a
//! rendered predicate string plus a named parameter per value. These
//! helpers keep placeholder naming consistent across the three.

use super::validate;
use super::{QueryError, SqlValue};

/// Picks a placeholder name not yet used by `params`. Dots in qualified
/// column names become underscores; repeats get a numeric suffix.
pub(crate) fn placeholder_name(params: &[(String, SqlValue)], prefix: &str, column: &str) -> String {
    let base = format!("{}{}", prefix, column.replace('.', "_"));
    if params.iter().all(|(name, _)| name != &base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if params.iter().all(|(name, _)| name != &candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Appends `column = :placeholder`.
pub(crate) fn push_eq(
    predicates: &mut Vec<String>,
    params: &mut Vec<(String, SqlValue)>,
    prefix: &str,
    column: &str,
    value: SqlValue,
) -> Result<(), QueryError> {
    validate::validate_column(column)?;
    let name = placeholder_name(params, prefix, column);
    predicates.push(format!("{} = :{}", column, name));
    params.push((name, value));
    Ok(())
}

/// Appends `column <op> :placeholder` for single-operand operators.
///
/// `IS NULL` and `IS NOT NULL` render inline since NULL is not a bindable
/// value in that position. List and range operators are rejected here and
/// routed through [`push_in`] and [`push_between`] instead.
pub(crate) fn push_op(
    predicates: &mut Vec<String>,
    params: &mut Vec<(String, SqlValue)>,
    prefix: &str,
    column: &str,
    operator: &str,
    value: SqlValue,
) -> Result<(), QueryError> {
    validate::validate_column(column)?;
    let operator = validate::validate_operator(operator)?;
    if matches!(operator.as_str(), "IN" | "NOT IN" | "BETWEEN" | "NOT BETWEEN") {
        return Err(QueryError::OperatorArity(operator));
    }
    if value.is_null() && matches!(operator.as_str(), "IS" | "IS NOT") {
        predicates.push(format!("{} {} NULL", column, operator));
        return Ok(());
    }
    let name = placeholder_name(params, prefix, column);
    predicates.push(format!("{} {} :{}", column, operator, name));
    params.push((name, value));
    Ok(())
}

/// Appends `column IN (:c, :c_2, ...)` with one placeholder per value.
pub(crate) fn push_in(
    predicates: &mut Vec<String>,
    params: &mut Vec<(String, SqlValue)>,
    prefix: &str,
    column: &str,
    negated: bool,
    values: &[SqlValue],
) -> Result<(), QueryError> {
    validate::validate_column(column)?;
    if values.is_empty() {
        return Err(QueryError::EmptyValues);
    }
    let mut names = Vec::with_capacity(values.len());
    for value in values {
        let name = placeholder_name(params, prefix, column);
        names.push(format!(":{}", name));
        params.push((name, value.clone()));
    }
    let keyword = if negated { "NOT IN" } else { "IN" };
    predicates.push(format!("{} {} ({})", column, keyword, names.join(", ")));
    Ok(())
}

/// Appends `column BETWEEN :low AND :high`.
pub(crate) fn push_between(
    predicates: &mut Vec<String>,
    params: &mut Vec<(String, SqlValue)>,
    prefix: &str,
    column: &str,
    negated: bool,
    low: SqlValue,
    high: SqlValue,
) -> Result<(), QueryError> {
    validate::validate_column(column)?;
    let low_name = placeholder_name(params, prefix, &format!("{}_low", column));
    params.push((low_name.clone(), low));
    let high_name = placeholder_name(params, prefix, &format!("{}_high", column));
    params.push((high_name.clone(), high));
    let keyword = if negated { "NOT BETWEEN" } else { "BETWEEN" };
    predicates.push(format!("{} {} :{} AND :{}", column, keyword, low_name, high_name));
    Ok(())
}
