//! Octocrab-backed [`Connection`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use http::header::LINK;
use http::StatusCode;
use octocrab::Octocrab;
use serde_json::Value;

use crate::github::error::ApiError;
use crate::github::pagination::next_page_link;
use crate::github::rate_limit::RateLimitInfo;
use crate::github::repository::PersonalAccessToken;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::error_mapping::{
    extract_github_message, is_rate_limit_response, map_http_error, map_octocrab_error,
    rate_limit_error,
};
use super::uri::{parse_api_base, request_uri};
use super::{ApiRequest, ApiResponse, Connection, Method};

/// Sends requests to the GitHub REST API through Octocrab.
///
/// Status codes are inspected here rather than by Octocrab so that `404`,
/// `422`, and rate limit rejections surface as distinct [`ApiError`]
/// variants with GitHub's own message attached.
pub struct OctocrabConnection {
    client: Octocrab,
    telemetry: Arc<dyn TelemetrySink>,
}

impl OctocrabConnection {
    /// Creates a connection from an existing Octocrab client.
    #[must_use]
    pub fn new(client: Octocrab) -> Self {
        Self {
            client,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Authenticates with `token` against `api_base`.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] for an unparseable `api_base`, or
    /// [`ApiError::Api`] when Octocrab rejects its configuration.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, ApiError> {
        let client = Octocrab::builder()
            .personal_token(token.value().to_owned())
            .base_uri(parse_api_base(api_base)?)
            .map_err(|error| ApiError::Api {
                status: None,
                message: format!("invalid API base {api_base}: {error}"),
            })?
            .build()
            .map_err(|error| map_octocrab_error("connect", &error))?;
        Ok(Self::new(client))
    }

    /// Routes request and rate limit events to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Turns a non-2xx response into an error, distinguishing rate limits.
    async fn error_for_status(
        &self,
        operation: &str,
        status: StatusCode,
        header_rate_limit: Option<RateLimitInfo>,
        body: &str,
    ) -> ApiError {
        let (message, documentation_url) = extract_github_message(body);
        let text = message.as_deref().unwrap_or_default();

        if is_rate_limit_response(
            status,
            header_rate_limit.as_ref(),
            text,
            documentation_url.as_deref(),
        ) {
            let rate_limit = if header_rate_limit.is_some() {
                header_rate_limit
            } else {
                self.fetch_rate_limit_info().await
            };
            self.telemetry.record(TelemetryEvent::RateLimited {
                reset_at: rate_limit.map(|info| info.reset_at()),
            });
            tracing::warn!(operation, ?rate_limit, "GitHub rate limit exceeded");
            return rate_limit_error(operation, text, rate_limit);
        }

        map_http_error(operation, status, message)
    }

    /// Fetches rate limit information from the GitHub API.
    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

#[async_trait]
impl Connection for OctocrabConnection {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let operation = request.describe();
        let uri = request_uri(&request)?;
        tracing::debug!(%operation, %uri, "sending GitHub request");

        let payload = request.body.as_ref();
        let sent = match request.method {
            Method::Get => self.client._get(uri).await,
            Method::Post => self.client._post(uri, payload).await,
            Method::Patch => self.client._patch(uri, payload).await,
            Method::Put => self.client._put(uri, payload).await,
        };
        let response = sent.map_err(|error| map_octocrab_error(&operation, &error))?;

        let status = response.status();
        let headers = response.headers().clone();
        self.telemetry.record(TelemetryEvent::RequestCompleted {
            method: request.method.as_str().to_owned(),
            path: request.target.as_str().to_owned(),
            status: status.as_u16(),
        });
        let rate_limit = RateLimitInfo::from_headers(&headers);

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| ApiError::Network {
                message: format!("{operation} response decode failed: {error}"),
            })?;

        if !status.is_success() {
            tracing::debug!(%operation, %status, "GitHub returned an error status");
            return Err(self
                .error_for_status(&operation, status, rate_limit, &body)
                .await);
        }

        let json = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|error| ApiError::Deserialisation {
                message: format!("{operation} response deserialisation failed: {error}"),
            })?
        };

        let next_page = headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_link);

        Ok(ApiResponse {
            status: status.as_u16(),
            body: json,
            next_page,
            rate_limit,
        })
    }
}
