// Input validation for event APIs
//
// Each check maps a raw request value to a typed one or to an ApiError that
// names the field and the expected format.

use super::common::ApiError;
use chrono::NaiveDate;
use evently_core::parse_date;
use std::borrow::Cow;

// =============================================================================
// Limits and messages
// =============================================================================

/// Maximum length of an event name, in characters (width of the name column).
pub const MAX_EVENT_NAME_CHARS: usize = 80;

pub const EVENT_NAME_REQUIRED: &str = "The event name is required!";
pub const EVENT_DATE_REQUIRED: &str =
    "The event date with the correct format is required! The correct format is YYYY-MM-DD!";
pub const START_TIME_INVALID: &str =
    "The start date of the events! The correct format is YYYY-MM-DD!";
pub const END_TIME_INVALID: &str = "The end date of the events! The correct format is YYYY-MM-DD!";

// =============================================================================
// Validation Functions
// =============================================================================

/// Message for names longer than `MAX_EVENT_NAME_CHARS`.
pub fn event_name_too_long_message() -> String {
    format!("The event name must be at most {MAX_EVENT_NAME_CHARS} characters!")
}

/// A bound of the list date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBound {
    Start,
    End,
}

impl FilterBound {
    /// Query parameter carrying the bound
    pub fn field(self) -> &'static str {
        match self {
            FilterBound::Start => "start_time",
            FilterBound::End => "end_time",
        }
    }

    fn invalid_message(self) -> &'static str {
        match self {
            FilterBound::Start => START_TIME_INVALID,
            FilterBound::End => END_TIME_INVALID,
        }
    }
}

/// Validate the `event` field of a create request. Blank names count as missing.
pub fn validate_event_name(name: Option<&str>) -> Result<String, ApiError> {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ApiError::Validation {
            field: "event",
            message: Cow::Borrowed(EVENT_NAME_REQUIRED),
        })?;

    if name.chars().count() > MAX_EVENT_NAME_CHARS {
        tracing::warn!(
            "Event name exceeds limit: {} chars (max: {})",
            name.chars().count(),
            MAX_EVENT_NAME_CHARS
        );
        return Err(ApiError::Validation {
            field: "event",
            message: Cow::Owned(event_name_too_long_message()),
        });
    }

    Ok(name.to_string())
}

/// Validate the `date` field of a create request.
pub fn validate_event_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
    date.and_then(|d| parse_date(d).ok())
        .ok_or(ApiError::Validation {
            field: "date",
            message: Cow::Borrowed(EVENT_DATE_REQUIRED),
        })
}

/// Validate an optional list filter bound.
///
/// Absent stays `None`. A present value must be a valid date, otherwise the
/// request is rejected rather than silently unfiltered.
pub fn validate_filter_bound(
    bound: FilterBound,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, ApiError> {
    value
        .map(|v| {
            parse_date(v).map_err(|_| ApiError::Validation {
                field: bound.field(),
                message: Cow::Borrowed(bound.invalid_message()),
            })
        })
        .transpose()
}
