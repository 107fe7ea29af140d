// Database models (internal, may differ from public DTOs)

use chrono::NaiveDate;
use evently_core::Event;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub name: String,
    pub date: NaiveDate,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event::new(row.id, row.name, row.date)
    }
}
