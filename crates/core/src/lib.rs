// Evently core
//
// DB-agnostic types shared by the storage, services and HTTP layers:
// - Event: the single domain entity (id, name, calendar date)
// - date: strict YYYY-MM-DD parsing
// - telemetry: tracing subscriber initialisation

pub mod date;
pub mod event;
pub mod telemetry;

pub use date::{parse_date, DateParseError, DATE_FORMAT};
pub use event::Event;
