// Event service for business logic
//
// Translates validated requests into store operations. Holds no event state
// of its own between requests: the store owns every record.

use crate::storage::{models::CreateEventRow, StorageBackend, StorageResult};
use chrono::NaiveDate;
use evently_core::Event;
use std::sync::Arc;
use tracing::Instrument;

/// Source of the service's notion of "today".
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Which events a list request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// No filtering
    All,
    /// `start <= date <= end`
    Between { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    /// Filter only when both bounds are present. A single bound means no filter.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => DateRange::Between { start, end },
            _ => DateRange::All,
        }
    }
}

pub struct EventService {
    store: Arc<StorageBackend>,
    clock: Clock,
}

impl EventService {
    pub fn new(store: Arc<StorageBackend>) -> Self {
        Self {
            store,
            clock: Arc::new(|| chrono::Local::now().date_naive()),
        }
    }

    /// Replace the server-local clock used by [`EventService::today`].
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn list(&self, range: DateRange) -> StorageResult<Vec<Event>> {
        let rows = match range {
            DateRange::All => self.store.list_events().await?,
            DateRange::Between { start, end } => {
                tracing::debug!(%start, %end, "Listing events in range");
                self.store.list_events_between(start, end).await?
            }
        };
        Ok(rows.into_iter().map(Event::from).collect())
    }

    /// Events dated on the server-local current day
    pub async fn today(&self) -> StorageResult<Vec<Event>> {
        let today = (self.clock)();
        let rows = self.store.list_events_on(today).await?;
        tracing::debug!(%today, count = rows.len(), "Listed today's events");
        Ok(rows.into_iter().map(Event::from).collect())
    }

    pub async fn create(&self, name: String, date: NaiveDate) -> StorageResult<Event> {
        let span = tracing::info_span!(
            "event.create",
            event.name = %name,
            event.date = %date,
            event.id = tracing::field::Empty,
        );

        self.create_inner(name, date).instrument(span).await
    }

    async fn create_inner(&self, name: String, date: NaiveDate) -> StorageResult<Event> {
        let row = self
            .store
            .create_event(CreateEventRow { name, date })
            .await?;

        tracing::Span::current().record("event.id", row.id);
        tracing::info!(event_id = row.id, "Event created");

        Ok(Event::from(row))
    }

    pub async fn get(&self, id: i64) -> StorageResult<Option<Event>> {
        let row = self.store.get_event(id).await?;
        Ok(row.map(Event::from))
    }

    pub async fn delete(&self, id: i64) -> StorageResult<bool> {
        let deleted = self.store.delete_event(id).await?;
        if deleted {
            tracing::info!(event_id = id, "Event deleted");
        }
        Ok(deleted)
    }
}
