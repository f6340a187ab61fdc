use log::info;

use super::{DbError, Dialect, QueryExecutor};

const MYSQL_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users(
    id INT NOT NULL AUTO_INCREMENT,
    PRIMARY KEY(id),
    name VARCHAR(30)
)";

const SQLITE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(30)
)";

/// Bootstrap statements for `dialect`, in the order they must run.
///
/// For SQLite the database is the file the executor was opened on, so only
/// the table is created.
pub fn bootstrap_statements(dialect: Dialect, database: &str) -> Vec<String> {
    match dialect {
        Dialect::MySql => vec![
            format!("CREATE DATABASE IF NOT EXISTS {database}"),
            format!("USE {database}"),
            MYSQL_USERS_TABLE.to_owned(),
        ],
        Dialect::Sqlite => vec![SQLITE_USERS_TABLE.to_owned()],
    }
}

/// Creates the database and the `users` table when they are missing.
///
/// `database` is interpolated into DDL and must already be a validated
/// identifier. Stops at the first failing statement.
pub async fn prepare_schema(db: &dyn QueryExecutor, database: &str) -> Result<(), DbError> {
    for statement in bootstrap_statements(db.dialect(), database) {
        db.execute(&statement, &[]).await?;
    }
    info!("Schema for database {} is ready", database);
    Ok(())
}
