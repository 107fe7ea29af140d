// Telemetry initialisation
//
// Sets up a tracing-subscriber registry with an env-driven filter and a
// console fmt layer (plain text or JSON lines).

use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Default filter when neither `RUST_LOG` nor `LOG_LEVEL` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Output format of the console layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Configuration for logging
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name, attached to the startup log line
    pub service_name: String,
    /// Service version
    pub service_version: Option<String>,
    /// Log filter (e.g., "info", "debug", "evently_api=debug")
    pub log_filter: Option<String>,
    /// Console output format
    pub format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "evently".to_string(),
            service_version: None,
            log_filter: None,
            format: LogFormat::Text,
        }
    }
}

impl TelemetryConfig {
    /// Load from environment variables:
    /// - `SERVICE_NAME`: Service name (default: "evently")
    /// - `RUST_LOG` or `LOG_LEVEL`: Log filter
    /// - `LOG_FORMAT`: "text" (default) or "json"
    pub fn from_env() -> Self {
        Self {
            service_name: std::env::var("SERVICE_NAME").unwrap_or_else(|_| "evently".to_string()),
            service_version: None,
            log_filter: std::env::var("RUST_LOG")
                .ok()
                .or_else(|| std::env::var("LOG_LEVEL").ok()),
            format: std::env::var("LOG_FORMAT")
                .map(|v| LogFormat::from(v.as_str()))
                .unwrap_or_default(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        self.log_filter
            .as_ref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Install the global tracing subscriber.
///
/// Call once at process start. A second call (e.g. from tests) is ignored.
pub fn init_telemetry(config: TelemetryConfig) {
    let filter = config.env_filter();

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    };

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        return;
    }

    tracing::debug!(
        service = %config.service_name,
        version = config.service_version.as_deref().unwrap_or("unknown"),
        format = ?config.format,
        "Telemetry initialized"
    );
}
