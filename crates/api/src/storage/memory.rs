// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: ids come from an atomic counter, so concurrent inserts never collide
//
// Mirrors the SQLite repository API so the rest of the service can run
// without a database file. All data is lost on restart.

use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::error::StorageResult;
use super::models::*;

/// In-memory database for dev mode
pub struct InMemoryDatabase {
    events: RwLock<BTreeMap<i64, EventRow>>,
    next_id: AtomicI64,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self {
            events: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_event(&self, input: CreateEventRow) -> StorageResult<EventRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = EventRow {
            id,
            name: input.name,
            date: input.date,
        };
        self.events.write().insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_event(&self, id: i64) -> StorageResult<Option<EventRow>> {
        Ok(self.events.read().get(&id).cloned())
    }

    pub async fn list_events(&self) -> StorageResult<Vec<EventRow>> {
        Ok(self.events.read().values().cloned().collect())
    }

    pub async fn list_events_on(&self, date: NaiveDate) -> StorageResult<Vec<EventRow>> {
        Ok(self
            .events
            .read()
            .values()
            .filter(|e| e.date == date)
            .cloned()
            .collect())
    }

    pub async fn list_events_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StorageResult<Vec<EventRow>> {
        Ok(self
            .events
            .read()
            .values()
            .filter(|e| start <= e.date && e.date <= end)
            .cloned()
            .collect())
    }

    pub async fn delete_event(&self, id: i64) -> StorageResult<bool> {
        Ok(self.events.write().remove(&id).is_some())
    }
}
