mod database;
mod error;
mod storage;
mod table;

pub use {
    database::Database,
    error::{Error, ErrorKind, Result},
    storage::LoadMode,
    table::Table,
};
