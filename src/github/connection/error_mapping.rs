//! Maps transport failures and HTTP error responses into [`ApiError`].

use http::StatusCode;

use crate::github::error::ApiError;
use crate::github::rate_limit::RateLimitInfo;

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// A `403` or `429` counts as a rate limit rejection when the response
/// headers show no quota left or GitHub's message points at the rate limit.
pub(super) fn is_rate_limit_response(
    status: StatusCode,
    quota: Option<&RateLimitInfo>,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    if !matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    ) {
        return false;
    }

    quota.is_some_and(RateLimitInfo::is_exhausted)
        || message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"))
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ApiError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return ApiError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    ApiError::Api {
        status: None,
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> ApiError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    match status {
        _ if is_auth_failure(status) => ApiError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            message: format!("{operation} failed: {message}"),
        },
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation {
            message: format!("{operation} failed: {message}"),
        },
        _ => ApiError::Api {
            status: Some(status.as_u16()),
            message: format!("{operation} failed with status {status}: {message}"),
        },
    }
}

pub(super) fn rate_limit_error(
    operation: &str,
    message: &str,
    rate_limit: Option<RateLimitInfo>,
) -> ApiError {
    let base_message = format!("{operation} failed: {message}");
    let full_message = match &rate_limit {
        Some(info) => format!("{base_message} (resets at {reset})", reset = info.reset_at()),
        None => base_message,
    };

    ApiError::RateLimitExceeded {
        rate_limit,
        message: full_message,
    }
}

/// Pulls `message` and `documentation_url` out of a GitHub error body.
pub(super) fn extract_github_message(body: &str) -> (Option<String>, Option<String>) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return (None, None);
    };
    let field = |name: &str| {
        value
            .get(name)
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned)
    };
    (field("message"), field("documentation_url"))
}
