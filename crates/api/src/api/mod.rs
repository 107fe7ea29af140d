// HTTP API routes
//
// Route handlers for the public API. Each resource module owns its AppState.

pub mod common;
pub mod events;
pub mod validation;

// Re-export common types
pub use common::{ApiError, ErrorResponse, MessageResponse};
