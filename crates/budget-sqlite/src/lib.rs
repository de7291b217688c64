//! SQLite storage backend for Budget.

pub mod db;
pub mod schema;
pub mod table;
pub mod tables;

pub use rusqlite::{self, Connection};

pub use db::{close, create_data_path, default_db_path, init_schema, open, open_in_memory};
pub use table::{row_to_record, SqliteTable};
pub use tables::{Accounts, Bills, Subscriptions, Transactions};

use budget_core::StorageError;

/// Sorts a rusqlite failure into the constraint / storage split callers can
/// act on.
pub(crate) fn storage_error(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::ConstraintViolation) => {
            StorageError::ConstraintViolation(e.to_string())
        }
        _ => StorageError::Storage(e.to_string()),
    }
}
