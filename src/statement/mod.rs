use crate::error::CrudError;
use crate::render;
use crate::translation::PlaceholderStyle;
use crate::types::{DatabaseType, RowValues};

mod dml;
mod select;

pub use dml::{delete, insert, insert_returning, update};
pub use select::SelectQuery;

/// Default `LIMIT` for SELECT statements when the caller does not set one.
/// A pagination default, not "unlimited".
pub const DEFAULT_SELECT_LIMIT: u64 = 15;

/// Default `LIMIT` for UPDATE/DELETE statements. Bounds accidental
/// unfiltered writes to a single row.
pub const DEFAULT_WRITE_LIMIT: u64 = 1;

/// SQL dialect a statement is built for.
///
/// The dialect decides the placeholder style and the row-address column used
/// to bound UPDATE/DELETE statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    #[must_use]
    pub fn style(self) -> PlaceholderStyle {
        match self {
            Dialect::Postgres => PlaceholderStyle::Postgres,
            Dialect::Sqlite => PlaceholderStyle::Sqlite,
        }
    }

    pub(crate) fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Sqlite => format!("?{index}"),
        }
    }

    /// Physical row address used to bound UPDATE/DELETE row counts.
    pub(crate) fn row_address(self) -> &'static str {
        match self {
            Dialect::Postgres => "ctid",
            Dialect::Sqlite => "rowid",
        }
    }
}

impl From<DatabaseType> for Dialect {
    fn from(db_type: DatabaseType) -> Self {
        match db_type {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => Dialect::Postgres,
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Dialect::Sqlite,
        }
    }
}

/// A built statement: SQL text plus the parameters its placeholders bind.
///
/// Immutable once built; this is the unit handed to the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The SQL text, with dialect-style numbered placeholders.
    pub sql: String,
    /// The parameters to be bound, in placeholder order.
    pub params: Vec<RowValues>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn without_params(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Render this statement as plain SQL text with every parameter inlined
    /// as an escaped literal — the fallback for contexts without parameter
    /// binding (diagnostics, SQL scripts).
    ///
    /// # Errors
    ///
    /// Returns `CrudError::ParameterError` if a placeholder has no matching
    /// parameter, or `CrudError::MalformedInput` for values with no literal
    /// form (non-finite floats).
    pub fn to_inline_sql(&self, dialect: Dialect) -> Result<String, CrudError> {
        render::inline_sql(dialect, &self.sql, &self.params)
    }
}

/// Sort direction for `ORDER BY`. A closed enum, so out-of-range directions
/// are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// An `ORDER BY {column} {direction}` directive.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

pub(crate) fn check_identifier(kind: &str, text: &str) -> Result<(), CrudError> {
    if text.trim().is_empty() {
        Err(CrudError::MalformedInput(format!(
            "{kind} must not be empty"
        )))
    } else {
        Ok(())
    }
}
