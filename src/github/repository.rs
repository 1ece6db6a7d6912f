//! Repository and pull request identity wrappers.
//!
//! Every pull request operation addresses its repository either by owner and
//! name or by the stable numeric repository identifier. Both forms normalise
//! into [`RepositoryRef`] before a request path is built.

use std::fmt;

use super::error::ApiError;

/// Owner and name are spliced into request paths, so each must stay a single
/// literal path segment.
fn path_segment(value: &str) -> Result<String, ApiError> {
    let breaks_path = |c: char| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    };
    if value.is_empty() || matches!(value, "." | "..") || value.contains(breaks_path) {
        return Err(ApiError::InvalidRepository);
    }
    Ok(value.to_owned())
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates an owner login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRepository`] when the value is empty, is
    /// `.` or `..`, or contains whitespace or one of `/`, `\`, `?`, `#`, `%`.
    pub fn new(value: &str) -> Result<Self, ApiError> {
        path_segment(value).map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates a repository name under the same rules as
    /// [`RepositoryOwner::new`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRepository`] when the value cannot be used
    /// as a single path segment.
    pub fn new(value: &str) -> Result<Self, ApiError> {
        path_segment(value).map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifies a repository by exactly one of the two addressing schemes.
///
/// # Example
///
/// ```
/// use pullwright::github::RepositoryRef;
///
/// let by_name = RepositoryRef::by_name("octokit", "octokit.net")
///     .expect("owner and name are non-empty");
/// assert_eq!(by_name.api_path(), "/repos/octokit/octokit.net");
///
/// let by_id = RepositoryRef::by_id(7_528_679);
/// assert_eq!(by_id.api_path(), "/repositories/7528679");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepositoryRef {
    /// Repository addressed by owner login and repository name.
    ByName {
        /// Owner login.
        owner: RepositoryOwner,
        /// Repository name.
        name: RepositoryName,
    },
    /// Repository addressed by its numeric identifier.
    ById(u64),
}

impl RepositoryRef {
    /// Builds an owner/name reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRepository`] when either part is not a
    /// single path segment.
    pub fn by_name(owner: &str, name: &str) -> Result<Self, ApiError> {
        Ok(Self::ByName {
            owner: RepositoryOwner::new(owner)?,
            name: RepositoryName::new(name)?,
        })
    }

    /// Builds a numeric identifier reference.
    #[must_use]
    pub const fn by_id(repository_id: u64) -> Self {
        Self::ById(repository_id)
    }

    /// Base API path for the repository.
    #[must_use]
    pub fn api_path(&self) -> String {
        match self {
            Self::ByName { owner, name } => {
                format!("/repos/{}/{}", owner.as_str(), name.as_str())
            }
            Self::ById(id) => format!("/repositories/{id}"),
        }
    }

    /// Appends a suffix to the repository base path.
    pub(crate) fn join(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.api_path())
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName { owner, name } => {
                write!(formatter, "{}/{}", owner.as_str(), name.as_str())
            }
            Self::ById(id) => write!(formatter, "repository {id}"),
        }
    }
}

impl From<u64> for RepositoryRef {
    fn from(repository_id: u64) -> Self {
        Self::ById(repository_id)
    }
}

impl TryFrom<(&str, &str)> for RepositoryRef {
    type Error = ApiError;

    fn try_from((owner, name): (&str, &str)) -> Result<Self, Self::Error> {
        Self::by_name(owner, name)
    }
}

/// Pull request number within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, ApiError> {
        if value == 0 {
            return Err(ApiError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

impl TryFrom<u64> for PullRequestNumber {
    type Error = ApiError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}
