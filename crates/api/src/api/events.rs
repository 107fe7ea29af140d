// Event HTTP routes
//
// GET    /event           list, optionally filtered by start_time/end_time
// GET    /event/today     events dated today (server-local)
// POST   /event           create from a JSON, form or multipart body, or query args
// GET    /event/:id       fetch one
// DELETE /event/:id       delete one

use crate::services::{DateRange, EventService};
use crate::storage::StorageBackend;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, Multipart, Path, Query, Request, State},
    http::header,
    routing::get,
    Form, Json, Router,
};
use chrono::NaiveDate;
use evently_core::Event;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use super::common::{ApiError, ErrorResponse, MessageResponse};
use super::validation::{
    validate_event_date, validate_event_name, validate_filter_bound, FilterBound,
};

pub const EVENT_ADDED_MESSAGE: &str = "The event has been added!";
pub const EVENT_DELETED_MESSAGE: &str = "The event has been deleted!";
pub const NO_EVENTS_TODAY_MESSAGE: &str = "There are no events for today!";

/// Query parameters for event listing.
/// The range filter applies only when both bounds are given.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    /// Earliest event date to include (YYYY-MM-DD)
    #[param(example = "2024-01-01")]
    pub start_time: Option<String>,
    /// Latest event date to include (YYYY-MM-DD)
    #[param(example = "2024-01-31")]
    pub end_time: Option<String>,
}

/// Request to create a new event
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    /// Name of the event.
    #[schema(example = "Standup")]
    pub event: Option<String>,
    /// Date of the event, YYYY-MM-DD.
    #[schema(example = "2024-01-10")]
    pub date: Option<String>,
}

/// Response to a successful create
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedEventResponse {
    #[schema(example = "The event has been added!")]
    pub message: String,
    /// Store-assigned id of the new event
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Standup")]
    pub event: String,
    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    pub date: NaiveDate,
}

/// Sentinel returned by `/event/today` instead of an empty list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoEventsResponse {
    #[schema(example = "There are no events for today!")]
    pub data: String,
}

/// Body of `/event/today`: a list when non-empty, the sentinel otherwise
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TodayResponse {
    Events(Vec<Event>),
    Empty(NoEventsResponse),
}

impl From<Vec<Event>> for TodayResponse {
    fn from(events: Vec<Event>) -> Self {
        if events.is_empty() {
            TodayResponse::Empty(NoEventsResponse {
                data: NO_EVENTS_TODAY_MESSAGE.to_string(),
            })
        } else {
            TodayResponse::Events(events)
        }
    }
}

impl CreateEventRequest {
    /// Fill fields missing here from `fallback`.
    fn or(self, fallback: CreateEventRequest) -> Self {
        Self {
            event: self.event.or(fallback.event),
            date: self.date.or(fallback.date),
        }
    }
}

/// Create request read from a JSON, urlencoded form or multipart body.
/// Fields the body does not carry are taken from the query string. An empty
/// body without a content type reads as an empty request.
pub struct CreateEventPayload(pub CreateEventRequest);

async fn read_multipart(mut multipart: Multipart) -> Result<CreateEventRequest, ApiError> {
    let mut req = CreateEventRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        let slot = match name.as_deref() {
            Some("event") => &mut req.event,
            Some("date") => &mut req.date,
            _ => continue,
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        // First occurrence wins
        slot.get_or_insert(value);
    }

    Ok(req)
}

#[async_trait]
impl<S> FromRequest<S> for CreateEventPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase());

        let Query(from_query) = Query::<CreateEventRequest>::try_from_uri(req.uri())?;

        let from_body = match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(body) = Json::<CreateEventRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                body
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(body) = Form::<CreateEventRequest>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                body
            }
            Some(ct) if ct.starts_with("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                read_multipart(multipart).await?
            }
            _ => {
                let body = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                if !body.is_empty() {
                    return Err(ApiError::BadRequest(
                        "Expected a JSON, urlencoded form or multipart body".to_string(),
                    ));
                }
                CreateEventRequest::default()
            }
        };

        Ok(Self(from_body.or(from_query)))
    }
}

// ============================================
// App State and Routes
// ============================================

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(store: Arc<StorageBackend>) -> Self {
        Self::from_service(EventService::new(store))
    }

    pub fn from_service(service: EventService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/event", get(list_events).post(create_event))
        .route("/event/today", get(list_today_events))
        .route("/event/:event_id", get(get_event).delete(delete_event))
        .with_state(state)
}

/// Path ids that are not integers name no event.
fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

// ============================================
// HTTP Handlers
// ============================================

/// GET /event/today - Events dated today
#[utoipa::path(
    get,
    path = "/event/today",
    responses(
        (status = 200, description = "Today's events; when there are none the body is {\"data\": \"There are no events for today!\"}", body = Vec<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_today_events(
    State(state): State<AppState>,
) -> Result<Json<TodayResponse>, ApiError> {
    let events = state.service.today().await?;
    Ok(Json(TodayResponse::from(events)))
}

/// GET /event - List events, filtered by an inclusive date range when both bounds are given
#[utoipa::path(
    get,
    path = "/event",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 400, description = "Malformed start_time or end_time", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let Query(query) = query?;
    let start = validate_filter_bound(FilterBound::Start, query.start_time.as_deref())?;
    let end = validate_filter_bound(FilterBound::End, query.end_time.as_deref())?;

    let events = state
        .service
        .list(DateRange::from_bounds(start, end))
        .await?;

    Ok(Json(events))
}

/// POST /event - Create a new event
#[utoipa::path(
    post,
    path = "/event",
    request_body(
        content = CreateEventRequest,
        description = "JSON object, urlencoded form or multipart form with `event` and `date`; missing fields are read from the query string"
    ),
    responses(
        (status = 200, description = "Event created", body = CreatedEventResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    CreateEventPayload(req): CreateEventPayload,
) -> Result<Json<CreatedEventResponse>, ApiError> {
    let name = validate_event_name(req.event.as_deref())?;
    let date = validate_event_date(req.date.as_deref())?;

    let event = state.service.create(name, date).await?;

    Ok(Json(CreatedEventResponse {
        message: EVENT_ADDED_MESSAGE.to_string(),
        id: event.id,
        event: event.name,
        date: event.date,
    }))
}

/// GET /event/{event_id} - Get event by ID
#[utoipa::path(
    get,
    path = "/event/{event_id}",
    params(
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let id = parse_event_id(&event_id)?;
    let event = state.service.get(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(event))
}

/// DELETE /event/{event_id} - Delete event
#[utoipa::path(
    delete,
    path = "/event/{event_id}",
    params(
        ("event_id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_event_id(&event_id)?;

    if state.service.delete(id).await? {
        Ok(Json(MessageResponse::new(EVENT_DELETED_MESSAGE)))
    } else {
        Err(ApiError::NotFound)
    }
}
