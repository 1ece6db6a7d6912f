//! Request quota reported by GitHub.
//!
//! Every response carries the `X-RateLimit-Limit`, `X-RateLimit-Remaining`,
//! and `X-RateLimit-Reset` headers. The connection keeps them on each
//! [`ApiResponse`](crate::github::ApiResponse) and attaches them to
//! rate limit failures.

use http::HeaderMap;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Request quota snapshot for the authenticated token.
///
/// # Example
///
/// ```
/// use pullwright::github::RateLimitInfo;
///
/// let quota = RateLimitInfo::new(60, 0, 1_700_000_000);
/// assert!(quota.is_exhausted());
/// assert_eq!(quota.reset_at(), 1_700_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Quota of `limit` requests with `remaining` left until `reset_at`.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads the quota from response headers.
    ///
    /// Returns `None` unless all three headers are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
        };

        let limit = u32::try_from(read(LIMIT_HEADER)?).ok()?;
        let remaining = u32::try_from(read(REMAINING_HEADER)?).ok()?;
        let reset_at = read(RESET_HEADER)?;
        Some(Self::new(limit, remaining, reset_at))
    }

    /// Requests allowed per window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix timestamp, in seconds, at which the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// True once no requests remain in the window.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

}
