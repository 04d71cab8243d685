use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, TripError},
    types::{ItineraryRequest, ItineraryResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://my-railway-app.up.railway.app";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const BASE_URL_ENV: &str = "TRIP_PLANNER_BASE_URL";
pub const TIMEOUT_ENV: &str = "TRIP_PLANNER_TIMEOUT_SECS";

const GENERATE_PATH: &str = "/generate-itinerary";

/// Anything that can turn a trip request into an itinerary
#[async_trait]
pub trait ItineraryService: Send + Sync + std::fmt::Debug {
    async fn generate(&self, request: &ItineraryRequest) -> Result<ItineraryResponse>;
}

/// HTTP client for the itinerary generation backend
#[derive(Clone, Debug)]
pub struct ItineraryClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for ItineraryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ItineraryClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint_url(&self) -> String {
        build_generate_url(&self.base_url)
    }

    /// Build a client from `TRIP_PLANNER_BASE_URL` and
    /// `TRIP_PLANNER_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        let mut client = Self::new();

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                client = client.with_base_url(base_url.trim());
            }
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let seconds = parse_timeout_secs(&raw).ok_or_else(|| {
                TripError::Config(format!(
                    "{TIMEOUT_ENV} must be a positive number of seconds, got `{raw}`"
                ))
            })?;
            client = client.with_timeout(Duration::from_secs(seconds));
        }

        Ok(client)
    }

    /// POST the request and read the reply.
    pub async fn post_request(&self, request: &ItineraryRequest) -> Result<ItineraryResponse> {
        let request_url = self.endpoint_url();
        info!("Requesting itinerary from {}", request_url);
        debug!(payload = ?request, "itinerary request body");

        let response = self
            .http
            .post(&request_url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Itinerary backend answered with status {}", status);
            return Err(TripError::from_status(status));
        }

        let response_text = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        let body: Value = serde_json::from_str(&response_text).map_err(TripError::Parse)?;
        let parsed = ItineraryResponse::from_value(&body);
        if parsed.itinerary_text.is_none() {
            debug!(body = %body, "response carried no itinerary_text");
        }

        Ok(parsed)
    }

    fn transport_error(&self, err: reqwest::Error) -> TripError {
        if err.is_timeout() {
            TripError::Timeout(self.timeout)
        } else {
            TripError::Network(err)
        }
    }
}

#[async_trait]
impl ItineraryService for ItineraryClient {
    async fn generate(&self, request: &ItineraryRequest) -> Result<ItineraryResponse> {
        self.post_request(request).await
    }
}

fn build_generate_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with(GENERATE_PATH) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, GENERATE_PATH)
    }
}

pub(crate) fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|seconds| *seconds > 0)
}
