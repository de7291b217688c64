//! Database file bootstrap: directory, connection, schema.

use std::path::{Path, PathBuf};

use budget_core::{StorageError, TableName};
use rusqlite::Connection;

use crate::{schema::create_table_sql, storage_error};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "budget.db";

pub fn default_db_path() -> PathBuf {
    Path::new(DEFAULT_DATA_DIR).join(DB_FILE_NAME)
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn create_data_path(dir: impl AsRef<Path>) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir.as_ref())?;
    Ok(())
}

/// Opens (creating if absent) the database file at `path` with foreign keys
/// enforced and the schema applied.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, StorageError> {
    let path = path.as_ref();
    let conn = Connection::open(path).map_err(storage_error)?;
    prepare(&conn)?;
    tracing::info!(path = %path.display(), "SQLite database opened");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(storage_error)?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(storage_error)?;
    init_schema(conn)
}

/// Creates every table that does not exist yet. Existing tables are left
/// untouched.
pub fn init_schema(conn: &Connection) -> Result<(), StorageError> {
    let ddl = TableName::ALL
        .iter()
        .map(|t| format!("{};", create_table_sql(*t).trim_end()))
        .collect::<Vec<_>>()
        .join("\n");
    conn.execute_batch(&ddl).map_err(storage_error)?;
    Ok(())
}

/// Names of the user tables present in the database.
pub fn table_names(conn: &Connection) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .map_err(storage_error)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(storage_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(storage_error)?;
    Ok(names)
}

/// Closes the connection, releasing the file handle.
pub fn close(conn: Connection) -> Result<(), StorageError> {
    conn.close().map_err(|(_, e)| storage_error(e))?;
    tracing::debug!("SQLite connection closed");
    Ok(())
}
