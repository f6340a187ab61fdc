use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use log::debug;
use rusqlite::{
    params_from_iter,
    types::{ToSql, ToSqlOutput, Value, ValueRef},
    Connection,
};

use super::{DbError, Dialect, Executed, QueryExecutor, Row, SqlValue};

/// Embedded backend: one rusqlite connection shared by every request.
///
/// The lock is never held across an await, so a plain `std` mutex is enough.
#[derive(Clone)]
pub struct SqliteExecutor {
    db_conn: Arc<Mutex<Connection>>,
}

impl SqliteExecutor {
    /// Opens (creating if absent) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        SqliteExecutor {
            db_conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DbError> {
        self.db_conn.lock().map_err(|_| DbError::Poisoned)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        })
    }
}

fn to_sql_value(value: ValueRef) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            SqlValue::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Executed, DbError> {
        debug!("sqlite execute: {}", sql);
        let db_conn = self.lock()?;
        let changed = db_conn.execute(sql, params_from_iter(params.iter()))?;
        let last_insert_id = (changed > 0).then(|| db_conn.last_insert_rowid());

        Ok(Executed {
            rows_affected: changed as u64,
            last_insert_id,
        })
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        debug!("sqlite query: {}", sql);
        let db_conn = self.lock()?;
        let mut prepared = db_conn.prepare(sql)?;
        let names: Vec<String> = prepared
            .column_names()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let rows = prepared
            .query_map(params_from_iter(params.iter()), |row| {
                let mut columns = Vec::with_capacity(names.len());
                for (i, name) in names.iter().enumerate() {
                    columns.push((name.clone(), to_sql_value(row.get_ref(i)?)));
                }
                Ok(Row::new(columns))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
