pub mod iso;

pub use iso::{parse_iso_string, TimestampParts};
