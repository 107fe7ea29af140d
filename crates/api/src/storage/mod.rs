// Storage layer for Evently
// Decision: Support both SQLite (default) and in-memory (dev mode)
//
// - Database: sqlx SQLite repository for the events table
// - InMemoryDatabase: BTreeMap-backed store with the same API
// - StorageBackend: enum dispatch over the two

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
