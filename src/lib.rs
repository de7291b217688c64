//! Personal finance tracker storage: accounts, bills, subscriptions and
//! transactions in a local SQLite file.

pub mod config;
pub mod error;
pub mod logging;
pub mod summary;

pub use budget_core::{
    DataValue, FieldDescriptor, FieldType, Record, RowId, StorageError, Table, TableName,
    TableSchema,
};
pub use budget_sqlite::{
    close, create_data_path, db, open, open_in_memory, row_to_record, Accounts, Bills,
    Connection, SqliteTable, Subscriptions, Transactions,
};
