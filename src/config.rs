//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a hardcoded fallback so
//! the service starts with no environment at all.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

/// Origins allowed to make cross-origin requests when
/// `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://13.215.186.119:3000",
    "http://stage-ashish.learn.cloudlaya.com",
];

/// Which [`crate::persistence::RecordStore`] implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MySQL through a `sqlx` connection pool.
    MySql,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Log line format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Text,
    /// One JSON object per line.
    Json,
}

/// MySQL connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database (schema) name.
    pub database: String,
    /// Table holding the records.
    pub table: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long a caller waits for a pooled connection.
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    /// Builds `sqlx` connect options from these settings.
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Datastore connection settings.
    pub database: DatabaseConfig,

    /// Selected store implementation.
    pub store_backend: StoreBackend,

    /// Period of the background reachability check. `None` disables the
    /// timer; the check then only runs at startup and on `GET /`.
    pub health_check_interval: Option<Duration>,

    /// Origins permitted to make cross-origin requests.
    pub allowed_origins: Vec<String>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST` is set but is not a valid IP address.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let host: IpAddr = std::env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()?;
        let port: u16 = parse_env("PORT", 5000);

        let database = DatabaseConfig {
            host: env_or("DB_HOST", "localhost"),
            port: parse_env("DB_PORT", 3306),
            user: env_or("DB_USER", "helloashish"),
            password: env_or("DB_PASSWORD", "password"),
            database: env_or("DB_DATABASE", "hello"),
            table: env_or("DB_TABLE", crate::persistence::mysql::DEFAULT_TABLE),
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            acquire_timeout: Duration::from_secs(parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", 10)),
        };

        let store_backend = match std::env::var("STORE_BACKEND").ok().as_deref() {
            Some("memory") | Some("MEMORY") => StoreBackend::Memory,
            _ => StoreBackend::MySql,
        };

        let health_check_interval = match parse_env::<u64>("HEALTH_CHECK_INTERVAL_SECS", 0) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origin_list(&raw))
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|o| (*o).to_string())
                    .collect()
            });

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            database,
            store_backend,
            health_check_interval,
            allowed_origins,
            log_format,
        })
    }
}

/// Splits a comma-separated origin list, dropping blanks and trailing
/// slashes so `http://a.example/` matches the browser's `http://a.example`.
#[must_use]
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
