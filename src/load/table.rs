//! Relational table sink with drop-and-recreate semantics.

use crate::errors::{AppError, AppResult};
use crate::types::{Dataset, Value};
use rusqlite::types::{ToSqlOutput, Value as SqlValue};
use rusqlite::{Connection, ToSql};
use tracing::{debug, info};

/// A destination that persists the final dataset into a named relational
/// table, fully replacing it on each run. Kept as a trait so tests can stub
/// the relational step without a live database.
pub trait TableSink {
    /// Replace `table` with the dataset's contents; returns rows written.
    fn replace(&mut self, table: &str, data: &Dataset) -> AppResult<usize>;
}

/// SQLite-backed sink, opened from a path-style connection string.
pub struct SqliteSink {
    connection: Connection,
}

impl SqliteSink {
    pub fn open(database_url: &str) -> AppResult<Self> {
        let connection = Connection::open(database_url)?;
        info!("Database connection established: {}", database_url);
        Ok(Self { connection })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(Self { connection })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl TableSink for SqliteSink {
    fn replace(&mut self, table: &str, data: &Dataset) -> AppResult<usize> {
        let result = replace_table(&mut self.connection, table, data);
        result.map_err(|source| AppError::Load {
            table: table.to_string(),
            source,
        })
    }
}

/// Drop, recreate and repopulate `table` atomically.
fn replace_table(
    connection: &mut Connection,
    table: &str,
    data: &Dataset,
) -> Result<usize, rusqlite::Error> {
    let tx = connection.transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])?;

    let column_defs: Vec<String> = data
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("{} {}", quote_ident(name), column_affinity(data, idx)))
        .collect();
    tx.execute(
        &format!(
            "CREATE TABLE {} ({})",
            quote_ident(table),
            column_defs.join(", ")
        ),
        [],
    )?;

    let placeholders: Vec<String> = (1..=data.columns().len())
        .map(|i| format!("?{}", i))
        .collect();
    let insert_sql = format!(
        "INSERT INTO {} VALUES ({})",
        quote_ident(table),
        placeholders.join(", ")
    );

    {
        let mut stmt = tx.prepare_cached(&insert_sql)?;
        for row in data.rows() {
            stmt.execute(rusqlite::params_from_iter(row.iter()))?;
        }
    }

    tx.commit()?;
    debug!("Replaced table {} with {} rows", table, data.len());
    Ok(data.len())
}

/// Column affinity from the first non-missing cell, TEXT when none exists.
fn column_affinity(data: &Dataset, idx: usize) -> &'static str {
    for row in data.rows() {
        match &row[idx] {
            Value::Missing => continue,
            Value::Number(_) => return "REAL",
            Value::Bool(_) => return "INTEGER",
            Value::Text(_) | Value::DateTime(_) => return "TEXT",
        }
    }
    "TEXT"
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Missing => ToSqlOutput::Owned(SqlValue::Null),
            Value::Number(n) => ToSqlOutput::Owned(SqlValue::Real(*n)),
            Value::Text(s) => ToSqlOutput::Owned(SqlValue::Text(s.clone())),
            Value::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(*b as i64)),
            Value::DateTime(dt) => ToSqlOutput::Owned(SqlValue::Text(
                dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            )),
        })
    }
}
