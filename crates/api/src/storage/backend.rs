// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// StorageBackend works with either SQLite (default) or in-memory (dev mode)
// storage behind one API.

use chrono::NaiveDate;
use std::sync::Arc;

use super::error::StorageResult;
use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either SQLite or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// SQLite database (file or `sqlite::memory:`)
    Sqlite(Database),
    /// In-memory maps (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Open a SQLite storage backend from a database URL
    pub async fn sqlite(database_url: &str, create_if_missing: bool) -> StorageResult<Self> {
        let db = Database::connect(database_url, create_if_missing).await?;
        Ok(Self::Sqlite(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Short backend name, reported by the health endpoint
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::InMemory(_) => "memory",
        }
    }

    /// Release the backend's resources. No-op for the in-memory store.
    pub async fn close(&self) {
        if let Self::Sqlite(db) = self {
            db.close().await;
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> StorageResult<EventRow> {
        match self {
            Self::Sqlite(db) => db.create_event(input).await,
            Self::InMemory(db) => db.create_event(input).await,
        }
    }

    pub async fn get_event(&self, id: i64) -> StorageResult<Option<EventRow>> {
        match self {
            Self::Sqlite(db) => db.get_event(id).await,
            Self::InMemory(db) => db.get_event(id).await,
        }
    }

    pub async fn list_events(&self) -> StorageResult<Vec<EventRow>> {
        match self {
            Self::Sqlite(db) => db.list_events().await,
            Self::InMemory(db) => db.list_events().await,
        }
    }

    pub async fn list_events_on(&self, date: NaiveDate) -> StorageResult<Vec<EventRow>> {
        match self {
            Self::Sqlite(db) => db.list_events_on(date).await,
            Self::InMemory(db) => db.list_events_on(date).await,
        }
    }

    pub async fn list_events_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<EventRow>> {
        match self {
            Self::Sqlite(db) => db.list_events_between(start, end).await,
            Self::InMemory(db) => db.list_events_between(start, end).await,
        }
    }

    pub async fn delete_event(&self, id: i64) -> StorageResult<bool> {
        match self {
            Self::Sqlite(db) => db.delete_event(id).await,
            Self::InMemory(db) => db.delete_event(id).await,
        }
    }
}
