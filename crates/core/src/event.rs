// Event domain type
//
// An Event is a named calendar entry. The store assigns the id; name and
// date are always present. Events are never updated in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A named record with an associated calendar date.
///
/// Serialises as `{"id": 1, "event": "Standup", "date": "2024-01-10"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Store-assigned identifier. Unique and never reused.
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,
    /// Name of the event.
    #[serde(rename = "event")]
    #[cfg_attr(feature = "openapi", schema(example = "Standup"))]
    pub name: String,
    /// Calendar date of the event (YYYY-MM-DD).
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2024-01-10"))]
    pub date: NaiveDate,
}

impl Event {
    pub fn new(id: i64, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            date,
        }
    }
}
