//! URL parsing for pull request and repository links.
//!
//! Locators turn a browser URL into the API base URL plus the
//! [`RepositoryRef`] and [`PullRequestNumber`] the clients expect, so callers
//! can paste a link instead of assembling identifiers by hand.

use url::Url;

use super::error::ApiError;
use super::repository::{PullRequestNumber, RepositoryRef};

/// Public GitHub API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

fn invalid_url(error: impl ToString) -> ApiError {
    ApiError::InvalidUrl(error.to_string())
}

/// `github.com` links map to the public API. Any other host is treated as
/// GitHub Enterprise, whose API lives under `/api/v3` on the same origin.
fn api_base_for(link: &Url) -> Result<Url, ApiError> {
    let host = link
        .host_str()
        .ok_or_else(|| invalid_url("URL has no host"))?;
    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse(GITHUB_API_BASE).map_err(invalid_url);
    }

    let mut base = link.clone();
    base.set_path("api/v3");
    base.set_query(None);
    base.set_fragment(None);
    base.set_username("")
        .map_err(|()| invalid_url("URL cannot carry credentials"))?;
    base.set_password(None)
        .map_err(|()| invalid_url("URL cannot carry credentials"))?;
    Ok(base)
}

/// Parses `input` and reads the leading `owner/name` path segments.
///
/// Returns the parsed URL, the repository, and the segments that follow it.
fn split_link(input: &str) -> Result<(Url, RepositoryRef, Vec<String>), ApiError> {
    let link = Url::parse(input).map_err(invalid_url)?;
    let mut segments: Vec<String> = link
        .path_segments()
        .ok_or(ApiError::MissingPathSegments)?
        .map(str::to_owned)
        .collect();
    if segments.len() < 2 {
        return Err(ApiError::MissingPathSegments);
    }

    let rest = segments.split_off(2);
    let [owner, name] = segments.as_slice() else {
        return Err(ApiError::MissingPathSegments);
    };
    if owner.is_empty() || name.is_empty() {
        return Err(ApiError::MissingPathSegments);
    }
    let repository = RepositoryRef::by_name(owner, name)?;
    Ok((link, repository, rest))
}

/// A pull request link resolved to its API base, repository, and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    repository: RepositoryRef,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Parses `https://<host>/<owner>/<repo>/pull/<number>`, ignoring any
    /// trailing segments such as `/files`.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] for unparseable input,
    /// [`ApiError::MissingPathSegments`] when the path does not name a pull
    /// request, and [`ApiError::InvalidPullRequestNumber`] for a zero or
    /// non-numeric number.
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let (link, repository, rest) = split_link(input)?;
        let segment = match rest.as_slice() {
            [marker, segment, ..] if marker == "pull" && !segment.is_empty() => segment,
            _ => return Err(ApiError::MissingPathSegments),
        };
        let number = segment
            .parse::<u64>()
            .map_err(|_| ApiError::InvalidPullRequestNumber)
            .and_then(PullRequestNumber::new)?;

        Ok(Self {
            api_base: api_base_for(&link)?,
            repository,
            number,
        })
    }

    /// API base URL for the link's host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository containing the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }
}

/// A repository link resolved to its API base and repository.
///
/// # Example
///
/// ```
/// use pullwright::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/rust-lang/cargo/pulls")
///     .expect("link should parse");
/// assert_eq!(locator.repository().to_string(), "rust-lang/cargo");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    repository: RepositoryRef,
}

impl RepositoryLocator {
    /// Parses `https://<host>/<owner>/<repo>`. Trailing segments are ignored.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidUrl`] for unparseable input and
    /// [`ApiError::MissingPathSegments`] when owner or name is absent.
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let (link, repository, _) = split_link(input)?;
        Ok(Self {
            api_base: api_base_for(&link)?,
            repository,
        })
    }

    /// API base URL for the link's host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository the link points at.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryRef {
        &self.repository
    }
}
