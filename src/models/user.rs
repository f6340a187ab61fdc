use serde::{Deserialize, Serialize};

use crate::db::{DbError, Row};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
}

impl TryFrom<&Row> for User {
    type Error = DbError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.get_i64("id")?,
            name: row.get_opt_text("name")?,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AddUserQuery {
    pub name: Option<String>,
}

impl AddUserQuery {
    /// The submitted name, treating an empty value the same as a missing one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
