use crate::models::user::User;

use super::{DbError, QueryExecutor, SqlValue};

/// Row cap for listings.
pub const USERS_LIMIT: usize = 30;

pub async fn insert_new_user(db: &dyn QueryExecutor, name: &str) -> Result<Option<i64>, DbError> {
    let query = "INSERT INTO users (name) VALUES(?)";
    let executed = db.execute(query, &[SqlValue::from(name)]).await?;
    Ok(executed.last_insert_id)
}

/// Up to [`USERS_LIMIT`] users, in whatever order storage returns them.
pub async fn select_users(db: &dyn QueryExecutor) -> Result<Vec<User>, DbError> {
    let query = format!("SELECT * FROM users LIMIT {USERS_LIMIT}");
    let rows = db.query(&query, &[]).await?;
    rows.iter().map(User::try_from).collect()
}
