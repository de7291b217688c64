use crate::{models::Record, schema::TableName};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("storage failure: {0}")]
    Storage(String),
}

pub type RowId = i64;

/// CRUD surface shared by every table.
///
/// A missing id is a normal outcome: `get` yields `None`, while `edit` and
/// `delete` report whether a row was affected.
pub trait Table {
    fn name(&self) -> TableName;

    fn get(&self, id: RowId) -> Result<Option<Record>, StorageError>;
    fn get_all(&self) -> Result<Vec<Record>, StorageError>;

    /// Inserts `data` into the table's non-key columns. Fields the table does
    /// not declare are ignored and absent columns are stored as NULL. The
    /// generated id is not returned.
    fn add(&self, data: &Record) -> Result<(), StorageError>;

    /// Updates only the columns present in `data`. Returns `false` when no
    /// row has that id.
    fn edit(&self, id: RowId, data: &Record) -> Result<bool, StorageError>;

    fn delete(&self, id: RowId) -> Result<bool, StorageError>;
    fn exists(&self, id: RowId) -> Result<bool, StorageError>;
    fn count(&self) -> Result<u64, StorageError>;
}
