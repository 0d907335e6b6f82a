use crate::domain::model::NewSight;
use crate::domain::ports::SightFetcher;
use crate::utils::error::{FetchError, Result, SightError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ZONE_PARAM: &str = "zone";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fetches a zone's sights as a JSON array from `<endpoint>?<zone_param>=<zone>`.
pub struct HttpSightFetcher {
    client: Client,
    endpoint: String,
    zone_param: String,
}

impl HttpSightFetcher {
    pub fn new(
        endpoint: impl Into<String>,
        zone_param: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SightError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            zone_param: zone_param.into(),
        })
    }
}

#[async_trait]
impl SightFetcher for HttpSightFetcher {
    async fn fetch(&self, zone: &str) -> std::result::Result<Vec<NewSight>, FetchError> {
        tracing::debug!("Requesting sights for {} from {}", zone, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(self.zone_param.as_str(), zone)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Source response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::Status {
                zone: zone.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            zone: zone.to_string(),
            message: e.to_string(),
        })
    }
}
