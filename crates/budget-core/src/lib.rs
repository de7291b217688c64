//! Core types and traits for Budget storage backends.
//!
//! This crate provides the `Table` trait, the closed set of table identities
//! and their field descriptors, enabling storage implementations in separate
//! crates.

pub mod models;
pub mod schema;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{DataValue, Record};
pub use schema::{FieldDescriptor, FieldType, TableName, TableSchema};
pub use storage::{RowId, StorageError, Table};
