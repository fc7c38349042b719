mod dispatch;

pub use dispatch::{
    DatabaseExecutor, ExecOptions, execute_batch, execute_dml, execute_insert_returning_id,
    execute_select,
};
