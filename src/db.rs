use async_trait::async_trait;
use thiserror::Error;

pub mod mysql;
pub mod schema;
pub mod sqlite;
pub mod users;

pub use mysql::MySqlExecutor;
pub use sqlite::SqliteExecutor;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("mysql error: {0}")]
    MySql(#[from] sqlx::Error),
    #[error("Error locking db_conn")]
    Poisoned,
    #[error("column {0} missing from result row")]
    MissingColumn(String),
    #[error("column {column} is not {expected}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
    },
}

/// SQL flavour spoken by an executor. Only DDL differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

/// A single bound parameter or result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_owned())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// One result row, columns kept in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Row { columns }
    }

    pub fn get(&self, column: &str) -> Result<&SqlValue, DbError> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| DbError::MissingColumn(column.to_owned()))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, DbError> {
        match self.get(column)? {
            SqlValue::Integer(v) => Ok(*v),
            _ => Err(DbError::UnexpectedType {
                column: column.to_owned(),
                expected: "an integer",
            }),
        }
    }

    pub fn get_opt_text(&self, column: &str) -> Result<Option<String>, DbError> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            _ => Err(DbError::UnexpectedType {
                column: column.to_owned(),
                expected: "text",
            }),
        }
    }
}

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Executed {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

/// Runs parameterized statements against the single shared connection.
///
/// Handlers receive this as `Arc<dyn QueryExecutor>` through application
/// state, so tests can swap in any implementation.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    fn dialect(&self) -> Dialect;

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Executed, DbError>;

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::new(vec![
            ("id".to_owned(), SqlValue::Integer(7)),
            ("name".to_owned(), SqlValue::Null),
        ])
    }

    #[test]
    fn reads_typed_columns() {
        let row = sample();
        assert_eq!(row.get_i64("id").unwrap(), 7);
        assert_eq!(row.get_opt_text("name").unwrap(), None);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = sample().get("email").unwrap_err();
        assert!(matches!(err, DbError::MissingColumn(c) if c == "email"));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = sample().get_opt_text("id").unwrap_err();
        assert!(matches!(err, DbError::UnexpectedType { expected: "text", .. }));
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<&str>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("Bob")), SqlValue::Text("Bob".to_owned()));
    }
}
