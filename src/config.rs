use std::{net::IpAddr, path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use sqlx::mysql::MySqlConnectOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Mysql,
    Sqlite,
}

/// Runtime settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "user-registry", version, about = "Stores users and answers probes")]
pub struct Config {
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8005)]
    pub port: u16,

    #[arg(long, env = "DB_BACKEND", value_enum, default_value_t = Backend::Mysql)]
    pub backend: Backend,

    #[arg(long, env = "MYSQL_HOST", default_value = "mysql")]
    pub mysql_host: String,

    #[arg(long, env = "MYSQL_PORT", default_value_t = 3306)]
    pub mysql_port: u16,

    #[arg(long, env = "MYSQL_ROOT_USER")]
    pub mysql_user: Option<String>,

    #[arg(long, env = "MYSQL_ROOT_PASSWORD", hide_env_values = true)]
    pub mysql_password: Option<String>,

    /// Database to create and use; also the SQLite file stem.
    #[arg(long, env = "DB_NAME", default_value = "demo", value_parser = parse_identifier)]
    pub database: String,

    #[arg(long, env = "SQLITE_DIR", default_value = "./data")]
    pub sqlite_dir: PathBuf,

    /// Uptime before /_readyz starts answering 200.
    #[arg(long, env = "READINESS_DELAY_MS", default_value_t = 4000)]
    pub readiness_delay_ms: u64,

    /// Busy iterations performed by /api; 0 disables them.
    #[arg(long, env = "API_LOAD_ITERATIONS", default_value_t = 10_000)]
    pub api_load_iterations: u32,
}

impl Config {
    pub fn readiness_delay(&self) -> Duration {
        Duration::from_millis(self.readiness_delay_ms)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.sqlite_dir.join(format!("{}.db", self.database))
    }

    pub fn mysql_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.mysql_host)
            .port(self.mysql_port);
        if let Some(user) = &self.mysql_user {
            options = options.username(user);
        }
        if let Some(password) = &self.mysql_password {
            options = options.password(password);
        }
        options
    }
}

fn parse_identifier(value: &str) -> Result<String, String> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(value.to_owned())
    } else {
        Err(format!("{value:?} is not a plain SQL identifier"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn explicit_flags_are_parsed() {
        let config = Config::try_parse_from([
            "user-registry",
            "--port",
            "9000",
            "--backend",
            "sqlite",
            "--database",
            "other_db",
            "--sqlite-dir",
            "/tmp/registry",
            "--readiness-delay-ms",
            "250",
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.readiness_delay(), Duration::from_millis(250));
        assert_eq!(config.sqlite_path(), PathBuf::from("/tmp/registry/other_db.db"));
    }

    #[rstest]
    #[case("demo")]
    #[case("demo_2")]
    fn plain_identifiers_are_accepted(#[case] name: &str) {
        assert_eq!(parse_identifier(name).unwrap(), name);
    }

    #[rstest]
    #[case("")]
    #[case("demo; DROP DATABASE demo")]
    #[case("my-db")]
    fn unsafe_identifiers_are_rejected(#[case] name: &str) {
        assert!(parse_identifier(name).is_err());
    }
}
