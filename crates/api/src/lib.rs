// Evently API Library
// Decision: Shared library for binaries (API server, OpenAPI export) and tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Router assembly
pub mod app;

// Environment configuration
pub mod config;

// Services layer
pub mod services;
pub use services::EventService;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

pub use app::{build_app, build_app_with_state};
pub use config::{ServerConfig, StorageKind};
pub use storage::StorageBackend;

/// Open the store selected by `config`
pub async fn open_storage(config: &ServerConfig) -> storage::StorageResult<StorageBackend> {
    match config.storage {
        StorageKind::Sqlite => {
            StorageBackend::sqlite(&config.database_url, config.create_if_missing).await
        }
        StorageKind::Memory => Ok(StorageBackend::in_memory()),
    }
}
