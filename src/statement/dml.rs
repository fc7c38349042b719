use crate::clause::WhereClause;
use crate::error::CrudError;
use crate::record::Record;
use crate::types::RowValues;

use super::{DEFAULT_WRITE_LIMIT, Dialect, Statement, check_identifier};

/// Build an INSERT statement from a record.
///
/// Column names and placeholders derive from one pass over the same record,
/// so positional correspondence holds by construction.
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` if the table name is empty or the
/// record has no entries.
pub fn insert(dialect: Dialect, table: &str, record: &Record) -> Result<Statement, CrudError> {
    check_identifier("table name", table)?;
    if record.is_empty() {
        return Err(CrudError::MalformedInput(
            "INSERT requires a record with at least one column".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(record.len());
    let mut placeholders = Vec::with_capacity(record.len());
    let mut params = Vec::with_capacity(record.len());
    for (index, (column, value)) in record.iter().enumerate() {
        check_identifier("record column", column)?;
        columns.push(column);
        placeholders.push(dialect.placeholder(index + 1));
        params.push(value.clone());
    }

    Ok(Statement::new(
        format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        ),
        params,
    ))
}

/// Build an INSERT statement that reports the new row's id via `RETURNING`.
///
/// # Errors
///
/// Same conditions as [`insert`], plus an empty id column name.
pub fn insert_returning(
    dialect: Dialect,
    table: &str,
    record: &Record,
    id_column: &str,
) -> Result<Statement, CrudError> {
    check_identifier("id column", id_column)?;
    let mut statement = insert(dialect, table, record)?;
    statement.sql.push_str(" RETURNING ");
    statement.sql.push_str(id_column);
    Ok(statement)
}

/// Build a bounded UPDATE statement.
///
/// SET parameters precede WHERE parameters; placeholder numbering runs
/// sequentially across both. The affected row count is bounded through the
/// dialect's row-address column, since neither backend accepts `LIMIT`
/// directly on DML. Defaults to [`DEFAULT_WRITE_LIMIT`].
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for an empty table name, an empty
/// record, or an empty predicate list — an unfiltered UPDATE is rejected.
pub fn update(
    dialect: Dialect,
    table: &str,
    changes: &Record,
    filter: &WhereClause,
    limit: Option<u64>,
) -> Result<Statement, CrudError> {
    check_identifier("table name", table)?;
    if changes.is_empty() {
        return Err(CrudError::MalformedInput(
            "UPDATE requires a record with at least one column".to_string(),
        ));
    }
    if filter.is_empty() {
        return Err(CrudError::MalformedInput(
            "UPDATE requires at least one predicate".to_string(),
        ));
    }
    let limit = limit.unwrap_or(DEFAULT_WRITE_LIMIT);

    let mut assignments = Vec::with_capacity(changes.len());
    let mut params: Vec<RowValues> = Vec::with_capacity(changes.len());
    for (index, (column, value)) in changes.iter().enumerate() {
        check_identifier("record column", column)?;
        assignments.push(format!("{column} = {}", dialect.placeholder(index + 1)));
        params.push(value.clone());
    }

    let fragment = filter.render(dialect, changes.len() + 1)?;
    params.extend(fragment.params);

    let addr = dialect.row_address();
    Ok(Statement::new(
        format!(
            "UPDATE {table} SET {} WHERE {addr} IN (SELECT {addr} FROM {table}{} LIMIT {limit})",
            assignments.join(", "),
            fragment.sql
        ),
        params,
    ))
}

/// Build a bounded DELETE statement.
///
/// An empty predicate list is permitted — the limit still bounds the
/// statement to [`DEFAULT_WRITE_LIMIT`] rows by default, so an unfiltered
/// DELETE cannot clear a table by accident.
///
/// # Errors
///
/// Returns `CrudError::MalformedInput` for an empty table name or a
/// malformed predicate.
pub fn delete(
    dialect: Dialect,
    table: &str,
    filter: &WhereClause,
    limit: Option<u64>,
) -> Result<Statement, CrudError> {
    check_identifier("table name", table)?;
    let limit = limit.unwrap_or(DEFAULT_WRITE_LIMIT);
    let fragment = filter.render(dialect, 1)?;

    let addr = dialect.row_address();
    Ok(Statement::new(
        format!(
            "DELETE FROM {table} WHERE {addr} IN (SELECT {addr} FROM {table}{} LIMIT {limit})",
            fragment.sql
        ),
        fragment.params,
    ))
}
