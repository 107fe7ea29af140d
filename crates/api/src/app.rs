// Router assembly
//
// Builds the full axum application from a store handle and the server
// configuration: event routes (optionally prefixed), health, Swagger UI,
// CORS and request tracing.

use crate::api;
use crate::config::ServerConfig;
use crate::openapi::ApiDoc;
use crate::storage::StorageBackend;
use axum::http::{header, HeaderValue, Method};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    storage: &'static str,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: &'static str,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

/// Build the application with the default event state for `store`
pub fn build_app(store: Arc<StorageBackend>, config: &ServerConfig) -> Router {
    let storage = store.kind();
    build_app_with_state(api::events::AppState::new(store), storage, config)
}

/// Build the application around an existing event state
pub fn build_app_with_state(
    events_state: api::events::AppState,
    storage: &'static str,
    config: &ServerConfig,
) -> Router {
    let api_routes = api::events::routes(events_state);

    let app = Router::new()
        .route("/health", get(health).with_state(HealthState { storage }))
        .merge(build_router_with_prefix(api_routes, &config.api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let app = match cors_layer(&config.cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
}

/// CORS layer for the configured origins, or None when none are set
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();

    if origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        return None;
    }

    tracing::info!(origins = ?origins, "CORS origins configured");
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]),
    )
}

/// Build router with optional API prefix
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
