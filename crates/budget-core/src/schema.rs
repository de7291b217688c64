use std::{fmt::Display, str::FromStr};

use crate::storage::StorageError;

/// The closed set of tables the tracker stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableName {
    Accounts,
    Bills,
    Subscriptions,
    Transactions,
}

impl TableName {
    pub const ALL: [TableName; 4] = [
        TableName::Accounts,
        TableName::Bills,
        TableName::Subscriptions,
        TableName::Transactions,
    ];

    /// Physical table name. This is the only text that is ever interpolated
    /// into SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Accounts => "accounts",
            TableName::Bills => "bills",
            TableName::Subscriptions => "subscriptions",
            TableName::Transactions => "transactions",
        }
    }

    pub fn schema(&self) -> TableSchema {
        let fields = match self {
            TableName::Accounts => ACCOUNT_FIELDS,
            TableName::Bills => BILL_FIELDS,
            TableName::Subscriptions => SUBSCRIPTION_FIELDS,
            TableName::Transactions => TRANSACTION_FIELDS,
        };
        TableSchema {
            table: *self,
            fields,
        }
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableName::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| StorageError::Configuration(format!("unrecognized table: {s:?}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    Real,
    Text,
    /// ISO `YYYY-MM-DD` text.
    Date,
}

impl FieldType {
    /// Declared SQL type of the column.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::Real => "REAL",
            FieldType::Text | FieldType::Date => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
    pub primary_key: bool,
}

impl FieldDescriptor {
    const fn key(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Integer,
            nullable: true,
            primary_key: true,
        }
    }

    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            nullable: false,
            primary_key: false,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            nullable: true,
            primary_key: false,
        }
    }
}

const ACCOUNT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::key("id"),
    FieldDescriptor::required("provider_name", FieldType::Text),
    FieldDescriptor::optional("credit_limit", FieldType::Real),
    FieldDescriptor::optional("statement_date", FieldType::Date),
    FieldDescriptor::optional("start_date", FieldType::Date),
    FieldDescriptor::optional("opening_balance", FieldType::Real),
    FieldDescriptor::optional("interest_rate", FieldType::Real),
];

const BILL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::key("id"),
    FieldDescriptor::required("bill_name", FieldType::Text),
    FieldDescriptor::optional("bill_date", FieldType::Date),
    FieldDescriptor::optional("payment_cycle", FieldType::Text),
    FieldDescriptor::required("bill_amount", FieldType::Real),
];

const SUBSCRIPTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::key("id"),
    FieldDescriptor::required("service_name", FieldType::Text),
    FieldDescriptor::required("pay_amount", FieldType::Real),
];

const TRANSACTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::key("id"),
    FieldDescriptor::required("date", FieldType::Date),
    FieldDescriptor::required("type", FieldType::Text),
    FieldDescriptor::required("amount", FieldType::Real),
    FieldDescriptor::required("description", FieldType::Text),
    FieldDescriptor::required("spend_type", FieldType::Text),
    FieldDescriptor::required("vendor_or_debtor_name", FieldType::Text),
    FieldDescriptor::optional("paid_from_account_id", FieldType::Integer),
    FieldDescriptor::optional("paid_to_account_id", FieldType::Integer),
];

/// Column layout of one table, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub table: TableName,
    pub fields: &'static [FieldDescriptor],
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key(&self) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Every column except the generated key, in declaration order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| !f.primary_key)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}
