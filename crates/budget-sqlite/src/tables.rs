//! The concrete tables. Each one only fixes its table identity; every
//! operation goes through the shared [`SqliteTable`] implementation.

use std::ops::Deref;

use budget_core::{Record, RowId, StorageError, Table, TableName};
use rusqlite::Connection;

use crate::table::SqliteTable;

macro_rules! concrete_table {
    ($(#[$meta:meta])* $name:ident => $table:expr) => {
        $(#[$meta])*
        pub struct $name<'conn>(SqliteTable<'conn>);

        impl<'conn> $name<'conn> {
            pub fn new(conn: &'conn Connection) -> Self {
                Self(SqliteTable::new(conn, $table))
            }
        }

        impl<'conn> Deref for $name<'conn> {
            type Target = SqliteTable<'conn>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Table for $name<'_> {
            fn name(&self) -> TableName {
                self.0.name()
            }

            fn get(&self, id: RowId) -> Result<Option<Record>, StorageError> {
                self.0.get(id)
            }

            fn get_all(&self) -> Result<Vec<Record>, StorageError> {
                self.0.get_all()
            }

            fn add(&self, data: &Record) -> Result<(), StorageError> {
                self.0.add(data)
            }

            fn edit(&self, id: RowId, data: &Record) -> Result<bool, StorageError> {
                self.0.edit(id, data)
            }

            fn delete(&self, id: RowId) -> Result<bool, StorageError> {
                self.0.delete(id)
            }

            fn exists(&self, id: RowId) -> Result<bool, StorageError> {
                self.0.exists(id)
            }

            fn count(&self) -> Result<u64, StorageError> {
                self.0.count()
            }
        }
    };
}

concrete_table!(
    /// Credit cards, bank accounts and loans.
    Accounts => TableName::Accounts
);
concrete_table!(
    /// Recurring bills.
    Bills => TableName::Bills
);
concrete_table!(
    /// Flat-fee services.
    Subscriptions => TableName::Subscriptions
);
concrete_table!(
    /// Money movements, optionally linked to the accounts they were paid from
    /// or into.
    Transactions => TableName::Transactions
);
