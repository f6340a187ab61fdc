use std::{io, sync::Arc};

use log::info;
use thiserror::Error;

use crate::{
    config::{Backend, Config},
    db::{schema::prepare_schema, DbError, MySqlExecutor, QueryExecutor, SqliteExecutor},
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not create sqlite directory: {0}")]
    SqliteDir(#[from] io::Error),
    #[error("Error setting up db: {0}")]
    Db(#[from] DbError),
}

/// Opens the single shared connection and makes sure the schema exists.
///
/// The listener must not start unless this succeeds.
pub async fn prepare_database(config: &Config) -> Result<Arc<dyn QueryExecutor>, StartupError> {
    let db: Arc<dyn QueryExecutor> = match config.backend {
        Backend::Mysql => {
            info!(
                "Connecting to mysql at {}:{}",
                config.mysql_host, config.mysql_port
            );
            Arc::new(MySqlExecutor::connect(&config.mysql_options()).await?)
        }
        Backend::Sqlite => {
            std::fs::create_dir_all(&config.sqlite_dir)?;
            let path = config.sqlite_path();
            info!("Opening sqlite database {}", path.display());
            Arc::new(SqliteExecutor::open(path)?)
        }
    };

    prepare_schema(db.as_ref(), &config.database).await?;
    Ok(db)
}
