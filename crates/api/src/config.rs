// Server configuration
//
// Loaded from environment variables (after `.env` via dotenvy). The bind
// address comes from the command line, falling back to `BIND_ADDR`.

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://events.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown storage backend '{0}': expected 'sqlite' or 'memory'")]
    UnknownStorageBackend(String),
}

/// Command-line arguments of the API server
#[derive(Debug, Parser)]
#[command(name = "evently-api")]
#[command(about = "Evently - track named events on calendar dates")]
#[command(version)]
pub struct Args {
    /// Address to listen on (host:port)
    #[arg(env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,
}

/// Which store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Sqlite,
    Memory,
}

impl std::str::FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageKind::Sqlite),
            "memory" | "in-memory" | "inmemory" => Ok(StorageKind::Memory),
            other => Err(ConfigError::UnknownStorageBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listener address, `host:port`
    pub bind_addr: String,
    pub storage: StorageKind,
    /// SQLite URL, ignored for the memory backend
    pub database_url: String,
    /// Create the SQLite file when it does not exist yet
    pub create_if_missing: bool,
    /// Optional prefix the routes are nested under (e.g. "/api")
    pub api_prefix: String,
    /// Origins allowed by CORS; empty disables the CORS layer
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            storage: StorageKind::Sqlite,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            create_if_missing: true,
            api_prefix: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables:
    /// - `STORAGE_BACKEND`: "sqlite" (default) or "memory"
    /// - `DATABASE_URL` (default: sqlite://events.db)
    /// - `DATABASE_CREATE_IF_MISSING` (default: true)
    /// - `API_PREFIX` (default: empty)
    /// - `CORS_ALLOWED_ORIGINS`: comma separated list
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match non_empty("STORAGE_BACKEND") {
            Some(kind) => kind.parse()?,
            None => defaults.storage,
        };

        let create_if_missing = non_empty("DATABASE_CREATE_IF_MISSING")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(defaults.create_if_missing);

        let cors_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: defaults.bind_addr,
            storage,
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            create_if_missing,
            api_prefix: non_empty("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or_default(),
            cors_origins,
        })
    }

    /// Apply the parsed command line
    pub fn with_args(mut self, args: Args) -> Self {
        self.bind_addr = args.bind;
        self
    }
}

/// "api/" and "/api" both become "/api"; "/" becomes empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
