// OpenAPI specification generation
//
// Used by the API server (for Swagger UI) and by the export-openapi binary
// (for static spec generation).

use crate::api;
use evently_core::Event;
use utoipa::OpenApi;

/// OpenAPI documentation for the Evently API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::list_today_events,
        api::events::list_events,
        api::events::create_event,
        api::events::get_event,
        api::events::delete_event,
    ),
    components(
        schemas(
            Event,
            api::events::CreateEventRequest,
            api::events::CreatedEventResponse,
            api::events::NoEventsResponse,
            api::common::MessageResponse,
            api::common::ErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Calendar event endpoints")
    ),
    info(
        title = "Evently API",
        version = "0.1.0",
        description = "API for creating, listing, filtering and deleting calendar events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}
