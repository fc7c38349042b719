mod config;
mod executor;
mod params;
mod query;

pub use executor::{
    execute_batch, execute_dml, execute_select, insert_returning_rowid, last_insert_id,
};
pub use params::{Params, row_value_to_sqlite_value};
pub use query::{build_result_set, extract_value};
