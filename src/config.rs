//! Process configuration read from environment variables (after `.env` has
//! been loaded by `main`).

use std::env;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// How the HTTP layer runs. Chosen once at startup and handed to the server
/// constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    Debug,
    Release,
    Test,
}

impl ServerMode {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            ServerMode::Debug => "debug",
            ServerMode::Release => "info",
            ServerMode::Test => "warn",
        }
    }
}

impl FromStr for ServerMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "debug" => Ok(ServerMode::Debug),
            "release" => Ok(ServerMode::Release),
            "test" => Ok(ServerMode::Test),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mode: ServerMode,
}

impl ServerConfig {
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Where the database lives: a full URL or its individual parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
        ssl_mode: String,
    },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub max_connections: u32,
    pub auto_migrate: bool,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.target {
            DatabaseTarget::Url(url) => url.parse(),
            DatabaseTarget::Parts {
                host,
                port,
                user,
                password,
                name,
                ssl_mode,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(name)
                .ssl_mode(ssl_mode.parse()?)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in hours; always positive.
    pub expiry_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server = ServerConfig {
            host: get("SERVER_HOST", "127.0.0.1"),
            port: parse("SERVER_PORT", get("SERVER_PORT", "8080"))?,
            mode: parse_with("SERVER_MODE", get("SERVER_MODE", "debug"), |v| v.parse().ok())?,
        };

        let target = match lookup("DATABASE_URL") {
            Some(url) if !url.is_empty() => DatabaseTarget::Url(url),
            _ => {
                let ssl_mode = get("DB_SSLMODE", "disable");
                if PgSslMode::from_str(&ssl_mode).is_err() {
                    return Err(ConfigError::Invalid {
                        key: "DB_SSLMODE",
                        value: ssl_mode,
                    });
                }
                DatabaseTarget::Parts {
                    host: get("DB_HOST", "localhost"),
                    port: parse("DB_PORT", get("DB_PORT", "5432"))?,
                    user: get("DB_USER", "postgres"),
                    password: get("DB_PASSWORD", ""),
                    name: get("DB_NAME", "todoforge"),
                    ssl_mode,
                }
            }
        };

        let database = DatabaseConfig {
            target,
            max_connections: parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS", "100"))?,
            auto_migrate: parse("DB_AUTO_MIGRATE", get("DB_AUTO_MIGRATE", "true"))?,
        };

        let secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let expiry_hours = parse_with("JWT_EXPIRY_HOURS", get("JWT_EXPIRY_HOURS", "24"), |v| {
            v.parse::<i64>().ok().filter(|hours| *hours > 0)
        })?;

        Ok(Self {
            server,
            database,
            jwt: JwtConfig {
                secret,
                expiry_hours,
            },
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    parse_with(key, value, |v| v.parse().ok())
}

fn parse_with<T>(
    key: &'static str,
    value: String,
    parser: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parser(value.trim()).ok_or(ConfigError::Invalid { key, value })
}
