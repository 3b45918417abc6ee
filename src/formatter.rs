// Human-readable rendering of show times
use crate::model::TimestampError;
use crate::parser::parse_iso_string;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `Friday March, 5, 2021 at 2:30PM`
    Full,
    /// `Fri 03, 05, 2021 2:30PM`
    #[default]
    Medium,
}

impl DateFormat {
    fn pattern(self) -> &'static str {
        match self {
            DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(DateFormat::Full),
            "medium" => Ok(DateFormat::Medium),
            other => Err(format!("unknown date format '{}' (expected full or medium)", other)),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::Full => f.write_str("full"),
            DateFormat::Medium => f.write_str("medium"),
        }
    }
}

pub fn format_datetime(dt: &DateTime<Utc>, format: DateFormat) -> String {
    dt.format(format.pattern()).to_string()
}

/// Parses `text` with [`parse_iso_string`] and formats the result.
pub fn format_iso_string(text: &str, format: DateFormat) -> Result<String, TimestampError> {
    let dt = parse_iso_string(text)?;
    Ok(format_datetime(&dt, format))
}
