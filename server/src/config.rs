//! Startup configuration.
//!
//! Parsed once in `main` from flags and environment variables, then passed by
//! reference to whatever needs it. Nothing reads the environment afterwards.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args, Parser, ValueEnum};
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// Transient in-process list.
    Memory,
    /// The `todos` table in PostgreSQL.
    Postgres,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "todo-server", version, about = "Todo item HTTP API")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Storage backend; also selects which routes are served.
    #[arg(long, env = "TODO_STORAGE", value_enum, default_value_t = StorageKind::Memory)]
    pub storage: StorageKind,

    /// Pre-populate the in-memory store with a few demo items.
    #[arg(long, env = "SEED_DEMO_TODOS")]
    pub seed_demo: bool,

    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Deployment environment name. Informational only.
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub app_env: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    #[arg(long = "db-host", env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "db_port", long = "db-port", env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "db-name", env = "DB_NAME", default_value = "tododb")]
    pub name: String,

    #[arg(long = "db-user", env = "DB_USER", default_value = "todouser")]
    pub user: String,

    #[arg(long = "db-password", env = "DB_PASSWORD", default_value = "todopass", hide_env_values = true)]
    pub password: String,

    #[arg(long = "db-max-connections", env = "DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }

    /// `host:port/name`, safe to log.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let config = Config::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageKind::Memory);
        assert!(!config.seed_demo);
        assert_eq!(config.database.name, "tododb");
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "todo-server",
            "--storage",
            "postgres",
            "--port",
            "3000",
            "--db-host",
            "db",
            "--db-port",
            "5433",
        ])
        .unwrap();
        assert_eq!(config.storage, StorageKind::Postgres);
        assert_eq!(config.port, 3000);
        assert_eq!(config.database.endpoint(), "db:5433/tododb");
    }

    #[test]
    fn unknown_storage_is_rejected() {
        assert!(Config::try_parse_from(["todo-server", "--storage", "mysql"]).is_err());
    }
}
