//! Request payloads and list filters for pull request endpoints.

use serde::Serialize;

use crate::github::error::ApiError;

/// Pull request state filter for listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStateFilter {
    /// Only open pull requests.
    #[default]
    Open,
    /// Only closed pull requests.
    Closed,
    /// All pull requests regardless of state.
    All,
}

impl ItemStateFilter {
    /// Returns the API parameter value for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Sort key for pull request listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestSort {
    /// Creation time.
    #[default]
    Created,
    /// Last update time.
    Updated,
    /// Comment count.
    Popularity,
    /// Age, filtering out pull requests updated in the last month.
    LongRunning,
}

impl PullRequestSort {
    /// Returns the API parameter value for this sort key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Popularity => "popularity",
            Self::LongRunning => "long-running",
        }
    }
}

/// Direction applied to the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Newest or largest first.
    #[default]
    Descending,
    /// Oldest or smallest first.
    Ascending,
}

impl SortDirection {
    /// Returns the API parameter value for this direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Descending => "desc",
            Self::Ascending => "asc",
        }
    }
}

/// Filter and sort criteria for listing pull requests.
///
/// The default lists open pull requests, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// State filter.
    pub state: ItemStateFilter,
    /// Head branch filter in `user:ref-name` form.
    pub head: Option<String>,
    /// Base branch filter.
    pub base: Option<String>,
    /// Sort key.
    pub sort: PullRequestSort,
    /// Sort direction.
    pub direction: SortDirection,
}

impl PullRequestRequest {
    /// Query parameters describing this filter.
    pub(crate) fn query_parameters(&self) -> Vec<(String, String)> {
        let mut parameters = vec![
            ("state".to_owned(), self.state.as_str().to_owned()),
            ("sort".to_owned(), self.sort.as_str().to_owned()),
            ("direction".to_owned(), self.direction.as_str().to_owned()),
        ];
        if let Some(head) = &self.head {
            parameters.push(("head".to_owned(), head.clone()));
        }
        if let Some(base) = &self.base {
            parameters.push(("base".to_owned(), base.clone()));
        }
        parameters
    }
}

/// Payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// Title of the new pull request.
    pub title: String,
    /// Branch containing the changes, `user:branch` for cross-repository requests.
    pub head: String,
    /// Branch the changes should be pulled into.
    pub base: String,
    /// Description body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Opens the pull request as a draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// Allows maintainers of the base repository to push to the head branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

impl NewPullRequest {
    /// Creates a payload with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head: head.into(),
            base: base.into(),
            body: None,
            draft: None,
            maintainer_can_modify: None,
        }
    }

    /// Sets the description body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Marks the pull request as a draft.
    #[must_use]
    pub const fn as_draft(mut self) -> Self {
        self.draft = Some(true);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [
            ("title", &self.title),
            ("head", &self.head),
            ("base", &self.base),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::InvalidArgument {
                    message: format!("new pull request {field} must not be empty"),
                });
            }
        }
        Ok(())
    }
}

/// Target state when updating a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Reopen the pull request.
    Open,
    /// Close the pull request.
    Closed,
}

/// Fields to change on an existing pull request. Absent fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullRequestUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ItemState>,
    /// New base branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Allows maintainers of the base repository to push to the head branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_can_modify: Option<bool>,
}

impl PullRequestUpdate {
    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        if self == &Self::default() {
            return Err(ApiError::InvalidArgument {
                message: "pull request update must change at least one field".to_owned(),
            });
        }
        Ok(())
    }
}

/// Merge strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Create a merge commit.
    Merge,
    /// Squash all commits into one.
    Squash,
    /// Rebase the commits onto the base branch.
    Rebase,
}

/// Options for merging a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergePullRequest {
    /// Title for the merge commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_title: Option<String>,
    /// Extra detail appended to the merge commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    /// SHA the head branch must match for the merge to proceed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Merge strategy; GitHub defaults to a merge commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_method: Option<MergeMethod>,
}
