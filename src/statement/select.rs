use std::fmt::Write;

use crate::clause::WhereClause;
use crate::error::CrudError;

use super::{DEFAULT_SELECT_LIMIT, Dialect, OrderBy, OrderDirection, Statement, check_identifier};

/// Fluent description of a SELECT statement.
///
/// ```rust
/// use crud_sql::prelude::*;
///
/// let statement = SelectQuery::new("users")
///     .columns(["id", "name"])
///     .filter(WhereClause::new().and("age", ">", 21))
///     .order_by("name", OrderDirection::Asc)
///     .limit(50)
///     .build(Dialect::Postgres)
///     .unwrap();
/// assert_eq!(
///     statement.sql,
///     "SELECT id, name FROM users WHERE age > $1 ORDER BY name ASC LIMIT 50"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    filter: WhereClause,
    order: Option<OrderBy>,
    limit: u64,
}

impl SelectQuery {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filter: WhereClause::new(),
            order: None,
            limit: DEFAULT_SELECT_LIMIT,
        }
    }

    /// Request specific columns. Without this, the statement selects `*`.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: WhereClause) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: OrderDirection) -> Self {
        self.order = Some(OrderBy::new(column, direction));
        self
    }

    /// Override the row limit. Defaults to [`DEFAULT_SELECT_LIMIT`].
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Build the statement for the given dialect.
    ///
    /// An empty filter omits the WHERE fragment entirely.
    ///
    /// # Errors
    ///
    /// Returns `CrudError::MalformedInput` for empty table/column names or a
    /// malformed predicate.
    pub fn build(&self, dialect: Dialect) -> Result<Statement, CrudError> {
        check_identifier("table name", &self.table)?;
        for column in &self.columns {
            check_identifier("select column", column)?;
        }

        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let fragment = self.filter.render(dialect, 1)?;

        let mut sql = format!("SELECT {columns} FROM {}{}", self.table, fragment.sql);
        if let Some(order) = &self.order {
            check_identifier("order column", &order.column)?;
            let _ = write!(sql, " ORDER BY {} {}", order.column, order.direction.as_sql());
        }
        let _ = write!(sql, " LIMIT {}", self.limit);

        Ok(Statement::new(sql, fragment.params))
    }
}
