mod config;
mod executor;
mod params;
mod query;

pub use executor::{execute_batch, execute_dml, execute_select, insert_returning_id};
pub use params::Params;
pub use query::{build_result_set_from_rows, extract_value};
