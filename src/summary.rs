use std::fmt::Display;

use prettytable::{row, Table as PrettyTable};

use budget_core::{StorageError, Table, TableName};
use budget_sqlite::{Connection, SqliteTable};

/// Row counts for every table in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub counts: Vec<(TableName, u64)>,
}

impl Summary {
    pub fn collect(conn: &Connection) -> Result<Self, StorageError> {
        let counts = TableName::ALL
            .into_iter()
            .map(|t| SqliteTable::new(conn, t).count().map(|n| (t, n)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { counts })
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PrettyTable::new();
        table.add_row(row!["Table", "Rows"]);
        table.add_empty_row();

        for (name, count) in &self.counts {
            table.add_row(row![name, count]);
        }

        write!(f, "\n{}\n", table)
    }
}
