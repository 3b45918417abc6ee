use crate::client::traits::VenueApi;
use crate::config::AppConfig;
use crate::model::{DeleteError, DeleteResponse};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, info};

/// Path of a single venue. The identifier is inserted verbatim, without
/// percent-encoding.
pub fn venue_path(id: impl Display) -> String {
    format!("/venues/{}", id)
}

pub struct HttpVenueClient {
    client: Client,
    base_url: String,
}

impl HttpVenueClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::from_config(&AppConfig {
            base_url: base_url.into(),
            ..AppConfig::default()
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, id: &str) -> String {
        format!("{}{}", self.base_url, venue_path(id))
    }
}

#[async_trait::async_trait]
impl VenueApi for HttpVenueClient {
    async fn delete_venue(&self, id: &str) -> Result<DeleteResponse, DeleteError> {
        let url = self.build_url(id);
        debug!("DELETE {}", url);

        // the header is sent even though there is no body
        let response = self
            .client
            .delete(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        // status is not checked: whatever came back has to be json
        let status = response.status();
        let bytes = response.bytes().await?;
        let decoded: DeleteResponse =
            serde_json::from_slice(&bytes).map_err(|source| DeleteError::Decode {
                status: status.as_u16(),
                source,
            })?;

        info!("Venue {} delete answered [{}]: {}", id, status, decoded.body);
        Ok(decoded)
    }
}
