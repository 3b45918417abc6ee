// Core types: DeleteResponse, DeleteOutcome and the error enums
use serde::Deserialize;
use serde_json::Value;

use crate::utils::is_truthy;

/// Decoded body of a `DELETE /venues/<id>` call.
///
/// The server answers `{"deleted": true}` on success, but any JSON value is
/// accepted here: a body without the field simply means "not deleted".
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DeleteResponse {
    pub body: Value,
}

impl DeleteResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// `true` when the `deleted` field is present and truthy.
    pub fn is_deleted(&self) -> bool {
        self.body.get("deleted").is_some_and(is_truthy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Redirected { location: String },
    NotDeleted,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response is not valid json (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("no numeric components found")]
    Empty,
    #[error("missing {0} component")]
    MissingComponent(&'static str),
    #[error("{component} component '{value}' is not a number")]
    InvalidNumber {
        component: &'static str,
        value: String,
    },
    #[error("{component} value {value} is out of range")]
    OutOfRange { component: &'static str, value: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
