// Storage error types

use thiserror::Error;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Failures of the persistence layer. Always fatal to the current request.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection, I/O or SQL failure reported by the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
