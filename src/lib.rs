//! Minimal CRUD access layer for Postgres and `SQLite`.
//!
//! Structured inputs — ordered [`Record`](record::Record)s, flat
//! [`WhereClause`](clause::WhereClause) predicate lists, order/limit
//! directives — are compiled into parameterized SQL statements and
//! dispatched to the backend selected once at startup from a
//! [`DbConfig`](config::DbConfig).
//!
//! ```rust,no_run
//! use crud_sql::prelude::*;
//!
//! # async fn demo() -> Result<(), CrudError> {
//! let cap = ConfigAndPool::new_sqlite(":memory:").await?;
//! let mut conn = cap.get_connection().await?;
//!
//! let mut record = Record::new();
//! record.set("name", "Ada").set("age", 30);
//! crud_sql::crud::insert(&mut conn, "users", &record, &ExecOptions::default()).await?;
//!
//! let rows = crud_sql::crud::select(
//!     &mut conn,
//!     &SelectQuery::new("users").filter(WhereClause::new().and("age", ">", 21)),
//!     &ExecOptions::default(),
//! )
//! .await?;
//! # let _ = rows;
//! # Ok(()) }
//! ```

pub mod clause;
pub mod config;
pub mod crud;
pub mod error;
pub mod executor;
pub mod pool;
pub mod prelude;
pub mod record;
pub mod render;
pub mod results;
pub mod statement;
pub mod translation;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::CrudError;

use types::{ConversionMode, ParamConverter, RowValues};

/// Convert a slice of `RowValues` into a backend's parameter type via its
/// [`ParamConverter`].
///
/// # Errors
///
/// Returns `CrudError::ParameterError` if any parameter cannot be
/// converted.
pub fn convert_sql_params<'a, T: ParamConverter<'a>>(
    params: &'a [RowValues],
    mode: ConversionMode,
) -> Result<T::Converted, CrudError> {
    T::convert_sql_params(params, mode)
}
