//! NexTrip HTTP client.
//!
//! Issues the four GET requests the lookup pipeline needs. Every response is
//! a JSON array, decoded strictly into the record type for that endpoint.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{DirectionId, RouteId, StopId};

use super::api::TransitApi;
use super::error::ApiError;
use super::types::{DepartureRecord, DirectionRecord, RouteRecord, StopRecord};

/// Default base URL for the Metro Transit NexTrip API.
pub const DEFAULT_BASE_URL: &str = "https://svc.metrotransit.org/NexTrip";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Longest body excerpt kept on a decode error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the NexTrip client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexTripConfig {
    /// Base URL for the API, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NexTripConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NexTripConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// NexTrip API client.
#[derive(Debug, Clone)]
pub struct NexTripClient {
    http: reqwest::Client,
    base_url: String,
}

impl NexTripClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NexTripConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Build the request URL for a path below the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET `path` and decode the body as an array of `T`.
    async fn get_records<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        debug!(%url, "requesting");

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let records = decode_records(&body)?;
        debug!(%url, count = records.len(), "decoded records");
        Ok(records)
    }
}

impl TransitApi for NexTripClient {
    async fn routes(&self) -> Result<Vec<RouteRecord>, ApiError> {
        self.get_records("Routes").await
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<DirectionRecord>, ApiError> {
        self.get_records(&format!("Directions/{route}")).await
    }

    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<StopRecord>, ApiError> {
        self.get_records(&format!("Stops/{route}/{direction}")).await
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<DepartureRecord>, ApiError> {
        self.get_records(&format!("{route}/{direction}/{stop}")).await
    }
}

/// Decode a JSON array body, keeping a short excerpt of the body on failure.
pub(crate) fn decode_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NexTripConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = NexTripConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = NexTripClient::new(NexTripConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn url_joins_path() {
        let config = NexTripConfig::new().with_base_url("http://localhost:1234/NexTrip");
        let client = NexTripClient::new(config).unwrap();
        assert_eq!(
            client.url("Stops/901/1"),
            "http://localhost:1234/NexTrip/Stops/901/1"
        );
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode_records::<RouteRecord>("<html>down for maintenance</html>").unwrap_err();
        match err {
            ApiError::Json { body, .. } => {
                assert_eq!(body.as_deref(), Some("<html>down for maintenance</html>"));
            }
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let err = decode_records::<StopRecord>(r#"{"Text": "not an array"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Json { .. }));
    }

    #[test]
    fn decode_truncates_long_bodies() {
        let body = "x".repeat(2000);
        match decode_records::<StopRecord>(&body).unwrap_err() {
            ApiError::Json { body: Some(excerpt), .. } => {
                assert_eq!(excerpt.len(), BODY_EXCERPT_CHARS)
            }
            other => panic!("expected Json error with body, got {other:?}"),
        }
    }

    #[test]
    fn decode_empty_array() {
        let records: Vec<DepartureRecord> = decode_records("[]").unwrap();
        assert!(records.is_empty());
    }

    // Requests against a live server are covered by tests/http_client.rs,
    // which stands up a local axum server.
}
