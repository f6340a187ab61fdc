use async_trait::async_trait;
use log::debug;
use sqlx::{
    mysql::{MySqlArguments, MySqlConnectOptions, MySqlRow},
    query::Query,
    Column, Connection, MySql, MySqlConnection, Row as _, TypeInfo, ValueRef as _,
};
use tokio::sync::Mutex;

use super::{DbError, Dialect, Executed, QueryExecutor, Row, SqlValue};

/// MySQL backend: a single long-lived connection, no pool.
///
/// Statements hold the lock across awaits, hence the tokio mutex. `USE` only
/// works because every statement goes through this one connection.
pub struct MySqlExecutor {
    db_conn: Mutex<MySqlConnection>,
}

impl MySqlExecutor {
    pub async fn connect(options: &MySqlConnectOptions) -> Result<Self, DbError> {
        let conn = MySqlConnection::connect_with(options).await?;
        Ok(MySqlExecutor {
            db_conn: Mutex::new(conn),
        })
    }
}

fn bind_all<'q>(sql: &'q str, params: &'q [SqlValue]) -> Query<'q, MySql, MySqlArguments> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, param| match param {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        })
}

fn to_row(row: &MySqlRow) -> Result<Row, DbError> {
    let mut columns = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let i = column.ordinal();
        let value = if row.try_get_raw(i)?.is_null() {
            SqlValue::Null
        } else {
            let type_name = column.type_info().name();
            if type_name.contains("INT") {
                SqlValue::Integer(row.try_get::<i64, _>(i)?)
            } else if type_name == "FLOAT" || type_name == "DOUBLE" {
                SqlValue::Real(row.try_get::<f64, _>(i)?)
            } else {
                SqlValue::Text(row.try_get::<String, _>(i)?)
            }
        };
        columns.push((column.name().to_owned(), value));
    }
    Ok(Row::new(columns))
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Executed, DbError> {
        debug!("mysql execute: {}", sql);
        let mut db_conn = self.db_conn.lock().await;
        // `USE` and other DDL are not accepted by the prepared statement protocol.
        let result = if params.is_empty() {
            sqlx::Executor::execute(&mut *db_conn, sqlx::raw_sql(sql)).await?
        } else {
            bind_all(sql, params).execute(&mut *db_conn).await?
        };

        let last_insert_id = if result.rows_affected() > 0 {
            i64::try_from(result.last_insert_id()).ok()
        } else {
            None
        };
        Ok(Executed {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        debug!("mysql query: {}", sql);
        let mut db_conn = self.db_conn.lock().await;
        let rows = bind_all(sql, params).fetch_all(&mut *db_conn).await?;
        rows.iter().map(to_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shared_executor<T: QueryExecutor + 'static>() {}

    #[test]
    fn executor_can_be_shared_between_workers() {
        assert_shared_executor::<MySqlExecutor>();
    }
}
