use std::sync::Arc;

use budget_core::{DataValue, FieldDescriptor, Record, RowId, StorageError, Table, TableName, TableSchema};
use rusqlite::{
    params, params_from_iter,
    types::{Type, Value, ValueRef},
    Connection, OptionalExtension, Row,
};

use crate::storage_error;

const ID_COLUMN: &str = "\"id\"";

/// The single CRUD implementation shared by every table, bound to one
/// connection and one table identity.
pub struct SqliteTable<'conn> {
    conn: &'conn Connection,
    table: TableName,
}

impl<'conn> SqliteTable<'conn> {
    pub fn new(conn: &'conn Connection, table: TableName) -> Self {
        Self { conn, table }
    }

    /// Binds to a table given by name. Anything outside the known table set
    /// is rejected with a configuration error.
    pub fn from_name(conn: &'conn Connection, name: &str) -> Result<Self, StorageError> {
        Ok(Self::new(conn, name.parse()?))
    }

    pub fn schema(&self) -> TableSchema {
        self.table.schema()
    }

    fn select_sql(&self) -> String {
        let columns = self
            .schema()
            .column_names()
            .map(quote)
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {} FROM {}", columns, quote(self.table.as_str()))
    }

    fn query_records(&self, sql: &str, id: Option<RowId>) -> Result<Vec<Record>, StorageError> {
        let mut stmt = self.conn.prepare(sql).map_err(storage_error)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let row_mapper = |row: &Row| row_to_record(row, &names);
        let rows = match id {
            Some(id) => stmt.query_map(params![id], row_mapper),
            None => stmt.query_map([], row_mapper),
        }
        .map_err(storage_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(storage_error)
    }
}

impl Table for SqliteTable<'_> {
    fn name(&self) -> TableName {
        self.table
    }

    fn get(&self, id: RowId) -> Result<Option<Record>, StorageError> {
        let sql = format!("{} WHERE {} = ?1", self.select_sql(), ID_COLUMN);
        let record = self.query_records(&sql, Some(id))?.into_iter().next();
        tracing::debug!(table = %self.table, id, found = record.is_some(), "get");
        Ok(record)
    }

    fn get_all(&self) -> Result<Vec<Record>, StorageError> {
        let records = self.query_records(&self.select_sql(), None)?;
        tracing::debug!(table = %self.table, rows = records.len(), "get_all");
        Ok(records)
    }

    fn add(&self, data: &Record) -> Result<(), StorageError> {
        let schema = self.schema();
        for field in data.fields() {
            if !schema.insertable_columns().any(|c| c.name == field) {
                tracing::debug!(table = %self.table, field, "ignoring field not in schema");
            }
        }

        let columns: Vec<&FieldDescriptor> = schema.insertable_columns().collect();
        let col_list = columns
            .iter()
            .map(|c| quote(c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let values = columns
            .iter()
            .map(|c| data.get(c.name).map_or(Value::Null, to_sql_value));

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(self.table.as_str()),
            col_list,
            placeholders
        );
        self.conn
            .execute(&sql, params_from_iter(values))
            .map_err(storage_error)?;
        tracing::debug!(table = %self.table, id = self.conn.last_insert_rowid(), "add");
        Ok(())
    }

    fn edit(&self, id: RowId, data: &Record) -> Result<bool, StorageError> {
        let schema = self.schema();
        let mut assignments = Vec::new();
        let mut values = Vec::new();
        for (field, value) in data.iter() {
            match schema.column(field) {
                Some(column) if column.primary_key => {
                    tracing::warn!(table = %self.table, id, "primary key is immutable, ignoring");
                }
                Some(column) => {
                    values.push(to_sql_value(value));
                    assignments.push(format!("{} = ?{}", quote(column.name), values.len()));
                }
                None => {
                    tracing::debug!(table = %self.table, field, "ignoring field not in schema");
                }
            }
        }

        if assignments.is_empty() {
            return self.exists(id);
        }

        values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote(self.table.as_str()),
            assignments.join(", "),
            ID_COLUMN,
            values.len()
        );
        let changed = self
            .conn
            .execute(&sql, params_from_iter(values))
            .map_err(storage_error)?;
        tracing::debug!(table = %self.table, id, changed, "edit");
        Ok(changed > 0)
    }

    fn delete(&self, id: RowId) -> Result<bool, StorageError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?1",
            quote(self.table.as_str()),
            ID_COLUMN
        );
        let changed = self
            .conn
            .execute(&sql, params![id])
            .map_err(storage_error)?;
        tracing::debug!(table = %self.table, id, changed, "delete");
        Ok(changed > 0)
    }

    fn exists(&self, id: RowId) -> Result<bool, StorageError> {
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = ?1",
            quote(self.table.as_str()),
            ID_COLUMN
        );
        let found: Option<i64> = self
            .conn
            .query_row(&sql, params![id], |row| row.get(0))
            .optional()
            .map_err(storage_error)?;
        Ok(found.is_some())
    }

    fn count(&self) -> Result<u64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote(self.table.as_str()));
        let count: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(storage_error)?;
        u64::try_from(count).map_err(|e| StorageError::Storage(e.to_string()))
    }
}

/// Builds a record from one result row, naming each cell after the matching
/// entry of `column_names`.
pub fn row_to_record(row: &Row, column_names: &[String]) -> rusqlite::Result<Record> {
    let mut record = Record::with_capacity(column_names.len());
    for (idx, name) in column_names.iter().enumerate() {
        record.insert(name, from_sql_value(idx, row.get_ref(idx)?)?);
    }
    Ok(record)
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident)
}

fn to_sql_value(value: &DataValue) -> Value {
    match value {
        DataValue::Null => Value::Null,
        DataValue::Int(i) => Value::Integer(*i),
        DataValue::Real(r) => Value::Real(*r),
        DataValue::Text(s) => Value::Text(s.to_string()),
        DataValue::Blob(b) => Value::Blob(b.clone()),
    }
}

/// Text that is not valid UTF-8 is an error, never a lossy copy.
fn from_sql_value(idx: usize, value: ValueRef<'_>) -> rusqlite::Result<DataValue> {
    Ok(match value {
        ValueRef::Null => DataValue::Null,
        ValueRef::Integer(i) => DataValue::Int(i),
        ValueRef::Real(r) => DataValue::Real(r),
        ValueRef::Text(t) => {
            let text = std::str::from_utf8(t).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?;
            DataValue::Text(Arc::from(text))
        }
        ValueRef::Blob(b) => DataValue::Blob(b.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn account(name: &str, credit_limit: f64) -> Record {
        Record::new()
            .with("provider_name", name)
            .with("credit_limit", credit_limit)
    }

    #[test]
    fn test_get_all_returns_inserted_account() {
        let conn = open_in_memory().unwrap();
        conn.execute(
            "INSERT INTO accounts (provider_name, credit_limit) VALUES (?1, ?2)",
            params!["TestBank", 1234.56],
        )
        .unwrap();

        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        let results = accounts.get_all().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].get("provider_name").and_then(DataValue::as_text), Some("TestBank"));
        let limit = results[0].get("credit_limit").and_then(DataValue::as_real).unwrap();
        assert!((limit - 1234.56).abs() < 1e-9);
    }

    #[test]
    fn test_records_follow_schema_column_order() {
        let conn = open_in_memory().unwrap();
        let bills = SqliteTable::new(&conn, TableName::Bills);
        bills
            .add(&Record::new().with("bill_amount", 80.0).with("bill_name", "Water"))
            .unwrap();

        let record = bills.get(1).unwrap().unwrap();
        assert_eq!(
            record.fields().collect::<Vec<_>>(),
            vec!["id", "bill_name", "bill_date", "payment_cycle", "bill_amount"]
        );
        assert!(record.get("bill_date").unwrap().is_null());
    }

    #[test]
    fn test_add_ignores_unknown_fields_and_id() {
        let conn = open_in_memory().unwrap();
        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        accounts
            .add(&account("Bank", 100.0).with("nickname", "main").with("id", 42))
            .unwrap();

        assert!(accounts.exists(1).unwrap());
        assert!(!accounts.exists(42).unwrap());
        let record = accounts.get(1).unwrap().unwrap();
        assert!(!record.contains("nickname"));
    }

    #[test]
    fn test_edit_without_schema_fields_reports_existence() {
        let conn = open_in_memory().unwrap();
        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        accounts.add(&account("Bank", 100.0)).unwrap();

        let unknown_only = Record::new().with("nickname", "main");
        assert!(accounts.edit(1, &unknown_only).unwrap());
        assert!(!accounts.edit(2, &unknown_only).unwrap());
    }

    #[test]
    fn test_edit_cannot_change_id() {
        let conn = open_in_memory().unwrap();
        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        accounts.add(&account("Bank", 100.0)).unwrap();

        let changed = accounts
            .edit(1, &Record::new().with("id", 5).with("provider_name", "Renamed"))
            .unwrap();
        assert!(changed);
        assert!(accounts.exists(1).unwrap());
        assert!(!accounts.exists(5).unwrap());
    }

    #[test]
    fn test_edit_can_clear_nullable_field() {
        let conn = open_in_memory().unwrap();
        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        accounts.add(&account("Bank", 100.0)).unwrap();

        accounts
            .edit(1, &Record::new().with("credit_limit", DataValue::Null))
            .unwrap();
        let record = accounts.get(1).unwrap().unwrap();
        assert!(record.get("credit_limit").unwrap().is_null());
        assert_eq!(record.get("provider_name").and_then(DataValue::as_text), Some("Bank"));
    }

    #[test]
    fn test_edit_required_field_to_null_is_constraint_violation() {
        let conn = open_in_memory().unwrap();
        let accounts = SqliteTable::new(&conn, TableName::Accounts);
        accounts.add(&account("Bank", 100.0)).unwrap();

        let result = accounts.edit(1, &Record::new().with("provider_name", DataValue::Null));
        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[test]
    fn test_from_name() {
        let conn = open_in_memory().unwrap();
        let table = SqliteTable::from_name(&conn, "subscriptions").unwrap();
        assert_eq!(table.name(), TableName::Subscriptions);
        assert!(matches!(
            SqliteTable::from_name(&conn, "sqlite_master"),
            Err(StorageError::Configuration(_))
        ));
    }

    #[test]
    fn test_count() {
        let conn = open_in_memory().unwrap();
        let subscriptions = SqliteTable::new(&conn, TableName::Subscriptions);
        assert_eq!(subscriptions.count().unwrap(), 0);
        for (name, amount) in [("Music", 9.99), ("Video", 15.49), ("Cloud", 2.99)] {
            subscriptions
                .add(&Record::new().with("service_name", name).with("pay_amount", amount))
                .unwrap();
        }
        assert_eq!(subscriptions.count().unwrap(), 3);
    }

    #[test]
    fn test_invalid_utf8_text_is_storage_error() {
        let conn = open_in_memory().unwrap();
        conn.execute(
            "INSERT INTO bills (bill_name, bill_amount) VALUES (CAST(X'52FF6E74' AS TEXT), 950.0)",
            [],
        )
        .unwrap();

        let bills = SqliteTable::new(&conn, TableName::Bills);
        assert!(matches!(bills.get(1), Err(StorageError::Storage(_))));
        assert!(matches!(bills.get_all(), Err(StorageError::Storage(_))));

        let stored: Vec<u8> = conn
            .query_row("SELECT CAST(bill_name AS BLOB) FROM bills WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, vec![0x52, 0xFF, 0x6E, 0x74]);
    }

    #[test]
    fn test_blob_and_text_values_survive_storage() {
        let conn = open_in_memory().unwrap();
        conn.execute(
            "INSERT INTO bills (bill_name, payment_cycle, bill_amount) VALUES (?1, ?2, ?3)",
            params!["Rent", vec![1u8, 2, 3], 950.0],
        )
        .unwrap();

        let bills = SqliteTable::new(&conn, TableName::Bills);
        let record = bills.get(1).unwrap().unwrap();
        assert_eq!(record.get("payment_cycle"), Some(&DataValue::Blob(vec![1, 2, 3])));
        assert_eq!(record.get("bill_name"), Some(&DataValue::from("Rent")));
    }
}
