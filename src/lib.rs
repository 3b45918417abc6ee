//! Client-side helpers for the Fyyur venue pages: a lenient ISO-8601
//! timestamp parser and the venue delete flow.

pub mod client;
pub mod config;
pub mod formatter;
pub mod handler;
pub mod model;
pub mod parser;
pub mod utils;

pub use client::{venue_path, HttpVenueClient, VenueApi};
pub use config::{load_config, AppConfig};
pub use formatter::{format_datetime, format_iso_string, DateFormat};
pub use handler::{handle_delete_venue, LogNavigator, Navigator, VENUES_PATH};
pub use model::{ConfigError, DeleteError, DeleteOutcome, DeleteResponse, TimestampError};
pub use parser::{parse_iso_string, TimestampParts};
