//! Gateway configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). The configuration is read once at startup and handed to
//! the components that need it; nothing reads the environment afterwards.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// A configured secret whose value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database host name.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub name: String,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: Secret,
    /// Maximum number of database connections in the pool.
    pub max_connections: u32,
    /// Minimum idle connections in the pool.
    pub min_connections: u32,
    /// Timeout in seconds for acquiring a database connection.
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Builds `sqlx` connect options from the individual settings.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(self.password.expose())
    }

    /// Connection acquire timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL settings.
    pub database: DatabaseConfig,

    /// When `false` markers live in process memory and no database is used.
    pub persistence_enabled: bool,

    /// Upper bound on the time spent serving a single request.
    pub request_timeout_secs: u64,

    /// Third-party maps API key handed out by `GET /maps-key`.
    pub maps_api_key: Option<Secret>,

    /// Shared password checked by `POST /auth/check`.
    pub responses_password: Option<Secret>,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable optional values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, std::net::AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string())
            .parse()?;

        let database = DatabaseConfig {
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_value(&lookup, "DB_PORT", 5432),
            name: lookup("POSTGRES_DB").unwrap_or_else(|| "markers".to_string()),
            user: lookup("POSTGRES_USER").unwrap_or_else(|| "postgres".to_string()),
            password: Secret::new(lookup("POSTGRES_PASSWORD").unwrap_or_default()),
            max_connections: parse_value(&lookup, "DATABASE_MAX_CONNECTIONS", 10),
            min_connections: parse_value(&lookup, "DATABASE_MIN_CONNECTIONS", 1),
            connect_timeout_secs: parse_value(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 5),
        };

        Ok(Self {
            listen_addr,
            database,
            persistence_enabled: parse_bool(&lookup, "PERSISTENCE_ENABLED", true),
            request_timeout_secs: parse_value(&lookup, "REQUEST_TIMEOUT_SECS", 30),
            maps_api_key: non_empty_secret(&lookup, "GOOGLE_MAPS_API_KEY"),
            responses_password: non_empty_secret(&lookup, "RESPONSES_PASSWORD"),
        })
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses a value as `T`, returning `default` on missing or invalid input.
fn parse_value<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses a boolean. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

/// Empty values count as unset.
fn non_empty_secret<F>(lookup: &F, key: &str) -> Option<Secret>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty()).map(Secret::new)
}
