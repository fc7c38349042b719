//! Convenient imports for common functionality.

pub use crate::clause::{Predicate, WhereClause, WhereFragment};
pub use crate::config::{BackendSettings, DbConfig};
pub use crate::error::CrudError;
pub use crate::executor::{DatabaseExecutor, ExecOptions};
pub use crate::pool::{ConfigAndPool, CrudPool, CrudPoolConnection};
pub use crate::record::Record;
pub use crate::results::{DbRow, ResultSet};
pub use crate::statement::{
    DEFAULT_SELECT_LIMIT, DEFAULT_WRITE_LIMIT, Dialect, OrderBy, OrderDirection, SelectQuery,
    Statement,
};
pub use crate::translation::{PlaceholderStyle, TranslationMode, translate_placeholders};
pub use crate::types::{ConversionMode, DatabaseType, RowValues};
