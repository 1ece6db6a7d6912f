//! Transport seam between the pull request clients and GitHub.
//!
//! The clients only shape requests and results; sending them is delegated to
//! a [`Connection`]. Tests substitute a mock connection, while
//! [`OctocrabConnection`] handles real HTTP requests. Typed decoding and
//! `Link` header pagination are layered over any connection.

mod api;
mod error_mapping;
mod octocrab_backend;
mod uri;

pub(crate) use api::ApiConnection;
pub use octocrab_backend::OctocrabConnection;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::rate_limit::RateLimitInfo;

/// HTTP verb of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `PUT`
    Put,
}

impl Method {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Where a request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// Path relative to the API base, e.g. `/repos/octo/repo/pulls`.
    Path(String),
    /// Absolute URL taken from a `Link` header.
    Absolute(String),
}

impl RequestTarget {
    /// Borrow the path or URL.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Path(value) | Self::Absolute(value) => value.as_str(),
        }
    }
}

/// A request shaped by a client and sent by a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path or absolute URL.
    pub target: RequestTarget,
    /// Query parameters appended to a relative path.
    pub query: Vec<(String, String)>,
    /// JSON body for write requests.
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: String, body: Option<Value>) -> Self {
        Self {
            method,
            target: RequestTarget::Path(path),
            query: Vec::new(),
            body,
        }
    }

    /// Builds a `GET` request for a relative path.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path.into(), None)
    }

    /// Builds a `POST` request carrying a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path.into(), Some(body))
    }

    /// Builds a `PATCH` request carrying a JSON body.
    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Patch, path.into(), Some(body))
    }

    /// Builds a `PUT` request carrying a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path.into(), Some(body))
    }

    /// Builds a `GET` request for the next page of a listing.
    #[must_use]
    pub const fn follow(next_page: String) -> Self {
        Self {
            method: Method::Get,
            target: RequestTarget::Absolute(next_page),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends query parameters.
    #[must_use]
    pub fn with_query(mut self, parameters: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(parameters);
        self
    }

    /// Returns the value of the first query parameter named `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Short description used in logs and error messages, e.g.
    /// `GET /repos/octo/repo/pulls`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.target.as_str())
    }
}

/// A successful response returned by a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx).
    pub status: u16,
    /// Decoded JSON body, `Value::Null` when the body was empty.
    pub body: Value,
    /// URL of the next page when the response is paginated.
    pub next_page: Option<String>,
    /// Request quota reported alongside the response.
    pub rate_limit: Option<RateLimitInfo>,
}

impl ApiResponse {
    /// Builds a response with a JSON body and no pagination.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            next_page: None,
            rate_limit: None,
        }
    }

    /// Builds an empty `204 No Content` response.
    #[must_use]
    pub const fn no_content() -> Self {
        Self::json(204, Value::Null)
    }

    /// Sets the next page URL.
    #[must_use]
    pub fn with_next_page(mut self, next_page: impl Into<String>) -> Self {
        self.next_page = Some(next_page.into());
        self
    }
}

/// Sends requests to GitHub.
///
/// Implementations own authentication, HTTP status mapping, and transport
/// failures: any non-2xx status must come back as an [`ApiError`], and the
/// clients pass that error to their callers unaltered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connection: Send + Sync {
    /// Send a single request and return the decoded response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests;
