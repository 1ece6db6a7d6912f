//! Request URI construction for the Octocrab connection.

use http::Uri;

use crate::github::error::ApiError;

use super::{ApiRequest, RequestTarget};

/// Parses the configured API base, e.g. `https://ghe.example.com/api/v3`.
pub(super) fn parse_api_base(api_base: &str) -> Result<Uri, ApiError> {
    api_base
        .parse::<Uri>()
        .map_err(|error| ApiError::InvalidUrl(format!("{api_base}: {error}")))
}

/// URI for `request`: a path with its encoded query, or a followed page URL.
///
/// Octocrab resolves relative paths against its base URI.
pub(super) fn request_uri(request: &ApiRequest) -> Result<Uri, ApiError> {
    let target = match &request.target {
        RequestTarget::Path(path) if request.query.is_empty() => path.clone(),
        RequestTarget::Path(path) => {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(
                    request
                        .query
                        .iter()
                        .map(|(key, value)| (key.as_str(), value.as_str())),
                )
                .finish();
            format!("{path}?{encoded}")
        }
        RequestTarget::Absolute(url) => url.clone(),
    };

    target
        .parse::<Uri>()
        .map_err(|error| ApiError::InvalidUrl(format!("{target}: {error}")))
}
