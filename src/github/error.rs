//! Error types exposed by the pull requests client.

use thiserror::Error;

use crate::github::rate_limit::RateLimitInfo;

/// Errors surfaced while validating input or communicating with GitHub.
///
/// Errors raised by a [`Connection`](super::connection::Connection) reach the
/// caller unaltered on both the future and the stream surface.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The repository owner or name was blank.
    #[error("repository must be identified by a non-empty owner and name")]
    InvalidRepository,

    /// A pull request number was zero or not numeric.
    #[error("pull request numbers start at 1")]
    InvalidPullRequestNumber,

    /// A GitHub URL failed to parse.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// A GitHub URL was missing required path segments.
    #[error("expected a URL shaped like /<owner>/<repo>/pull/<number>")]
    MissingPathSegments,

    /// No token was configured.
    #[error("no GitHub token configured; set --token or PULLWRIGHT_TOKEN")]
    MissingToken,

    /// A paging option was out of range.
    #[error("bad paging options: {message}")]
    InvalidPagination {
        /// Which option was rejected and why.
        message: String,
    },

    /// A request payload or argument was rejected before sending.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// GitHub answered `401`, or `403` without a rate limit marker.
    #[error("authentication failed: {message}")]
    Authentication {
        /// GitHub's message for the rejection.
        message: String,
    },

    /// The requested resource does not exist or is not visible to the token.
    #[error("not found: {message}")]
    NotFound {
        /// GitHub error message returned with the 404 response.
        message: String,
    },

    /// GitHub rejected the request payload.
    #[error("validation failed: {message}")]
    Validation {
        /// GitHub error message returned with the 422 response.
        message: String,
    },

    /// The request quota ran out.
    #[error("rate limited by GitHub: {message}")]
    RateLimitExceeded {
        /// Quota at the time of rejection, when headers or `/rate_limit`
        /// reported it.
        rate_limit: Option<RateLimitInfo>,
        /// GitHub's message, with the reset timestamp appended when known.
        message: String,
    },

    /// GitHub returned any other API error.
    #[error("GitHub request failed: {message}")]
    Api {
        /// Status code, absent for failures before a response arrived.
        status: Option<u16>,
        /// GitHub's message or a description of the failure.
        message: String,
    },

    /// The request never produced a response.
    #[error("could not reach GitHub: {message}")]
    Network {
        /// Transport failure.
        message: String,
    },

    /// A response body did not match the expected shape.
    #[error("failed to decode GitHub response: {message}")]
    Deserialisation {
        /// Decoder error detail.
        message: String,
    },

    /// Configuration could not be loaded or was incomplete.
    #[error("bad configuration: {message}")]
    Configuration {
        /// What was missing or malformed.
        message: String,
    },

    /// Writing output failed.
    #[error("output failed: {message}")]
    Io {
        /// Underlying I/O error.
        message: String,
    },
}

impl ApiError {
    /// Returns the HTTP status associated with this error, when known.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}
