//! Data models for pull requests and their sub-resources.
//!
//! Types prefixed with `Api` are private deserialisation targets mirroring the
//! GitHub JSON payloads; they convert into the public domain types so callers
//! never depend on the wire shape. Request payloads live in [`requests`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub mod requests;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Branch reference at either end of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRef {
    /// `owner:branch` label.
    pub label: Option<String>,
    /// Branch name.
    pub ref_name: String,
    /// Commit SHA the branch points at.
    pub sha: String,
}

/// A pull request as returned by GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequest {
    /// Global identifier.
    pub id: u64,
    /// Pull request number within the repository.
    pub number: u64,
    /// One-line summary.
    pub title: Option<String>,
    /// Description body.
    pub body: Option<String>,
    /// State (`open` or `closed`).
    pub state: Option<String>,
    /// Browser link.
    pub html_url: Option<String>,
    /// Login of the user who opened it.
    pub author: Option<String>,
    /// Branch the changes come from.
    pub head: Option<PullRequestRef>,
    /// Branch the changes merge into.
    pub base: Option<PullRequestRef>,
    /// Whether the pull request is a draft.
    pub draft: bool,
    /// Whether the pull request has been merged.
    pub merged: bool,
    /// Whether GitHub considers the pull request mergeable, once computed.
    pub mergeable: Option<bool>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Close timestamp.
    pub closed_at: Option<DateTime<Utc>>,
    /// Merge timestamp.
    pub merged_at: Option<DateTime<Utc>>,
}

/// Outcome of a merge request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestMerge {
    /// SHA of the merge commit.
    pub sha: Option<String>,
    /// Whether the merge succeeded.
    pub merged: bool,
    /// Message returned by GitHub.
    pub message: Option<String>,
}

/// A commit included in a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestCommit {
    /// Commit SHA.
    pub sha: String,
    /// Full commit message.
    pub message: Option<String>,
    /// GitHub login of the author, when linked to an account.
    pub author: Option<String>,
    /// HTML URL of the commit.
    pub html_url: Option<String>,
}

/// A file changed by a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestFile {
    /// Blob SHA.
    pub sha: Option<String>,
    /// Path of the file.
    pub filename: String,
    /// Change status (`added`, `modified`, `removed`, `renamed`, ...).
    pub status: Option<String>,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
    /// Total lines changed.
    pub changes: u64,
    /// Unified diff patch, omitted by GitHub for large or binary files.
    pub patch: Option<String>,
    /// Blob URL.
    pub blob_url: Option<String>,
    /// Raw content URL.
    pub raw_url: Option<String>,
}

/// A comment left on a line of a pull request's diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewComment {
    /// Comment identifier.
    pub id: u64,
    /// Markdown text.
    pub body: Option<String>,
    /// Login of the commenter.
    pub author: Option<String>,
    /// Path of the commented file, relative to the repository root.
    pub file_path: Option<String>,
    /// Line in the current diff, absent once the line is outdated.
    pub line_number: Option<u32>,
    /// Line in the diff the comment was first made on.
    pub original_line_number: Option<u32>,
    /// Surrounding diff hunk.
    pub diff_hunk: Option<String>,
    /// Head commit at the time of commenting.
    pub commit_sha: Option<String>,
    /// Parent comment when this is a threaded reply.
    pub in_reply_to_id: Option<u64>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestRef {
    pub(crate) label: Option<String>,
    #[serde(rename = "ref")]
    pub(crate) ref_name: String,
    pub(crate) sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequest {
    #[serde(default)]
    pub(crate) id: u64,
    pub(crate) number: u64,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) html_url: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) head: Option<ApiPullRequestRef>,
    pub(crate) base: Option<ApiPullRequestRef>,
    pub(crate) draft: Option<bool>,
    pub(crate) merged: Option<bool>,
    pub(crate) mergeable: Option<bool>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    pub(crate) closed_at: Option<DateTime<Utc>>,
    pub(crate) merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestMerge {
    pub(crate) sha: Option<String>,
    #[serde(default)]
    pub(crate) merged: bool,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommitDetail {
    pub(crate) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestCommit {
    pub(crate) sha: String,
    pub(crate) html_url: Option<String>,
    pub(crate) commit: Option<ApiCommitDetail>,
    pub(crate) author: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestFile {
    pub(crate) sha: Option<String>,
    pub(crate) filename: String,
    pub(crate) status: Option<String>,
    #[serde(default)]
    pub(crate) additions: u64,
    #[serde(default)]
    pub(crate) deletions: u64,
    #[serde(default)]
    pub(crate) changes: u64,
    pub(crate) patch: Option<String>,
    pub(crate) blob_url: Option<String>,
    pub(crate) raw_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReviewComment {
    pub(crate) id: u64,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) path: Option<String>,
    pub(crate) line: Option<u32>,
    pub(crate) original_line: Option<u32>,
    pub(crate) diff_hunk: Option<String>,
    pub(crate) commit_id: Option<String>,
    pub(crate) in_reply_to_id: Option<u64>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

fn login(user: Option<ApiUser>) -> Option<String> {
    user.and_then(|value| value.login)
}

impl From<ApiPullRequestRef> for PullRequestRef {
    fn from(value: ApiPullRequestRef) -> Self {
        Self {
            label: value.label,
            ref_name: value.ref_name,
            sha: value.sha,
        }
    }
}

impl From<ApiPullRequest> for PullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.id,
            number: value.number,
            title: value.title,
            body: value.body,
            state: value.state,
            html_url: value.html_url,
            author: login(value.user),
            head: value.head.map(Into::into),
            base: value.base.map(Into::into),
            draft: value.draft.unwrap_or(false),
            merged: value.merged.unwrap_or(value.merged_at.is_some()),
            mergeable: value.mergeable,
            created_at: value.created_at,
            updated_at: value.updated_at,
            closed_at: value.closed_at,
            merged_at: value.merged_at,
        }
    }
}

impl From<ApiPullRequestMerge> for PullRequestMerge {
    fn from(value: ApiPullRequestMerge) -> Self {
        Self {
            sha: value.sha,
            merged: value.merged,
            message: value.message,
        }
    }
}

impl From<ApiPullRequestCommit> for PullRequestCommit {
    fn from(value: ApiPullRequestCommit) -> Self {
        Self {
            sha: value.sha,
            message: value.commit.and_then(|detail| detail.message),
            author: login(value.author),
            html_url: value.html_url,
        }
    }
}

impl From<ApiPullRequestFile> for PullRequestFile {
    fn from(value: ApiPullRequestFile) -> Self {
        Self {
            sha: value.sha,
            filename: value.filename,
            status: value.status,
            additions: value.additions,
            deletions: value.deletions,
            changes: value.changes,
            patch: value.patch,
            blob_url: value.blob_url,
            raw_url: value.raw_url,
        }
    }
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(value: ApiReviewComment) -> Self {
        Self {
            id: value.id,
            body: value.body,
            author: login(value.user),
            file_path: value.path,
            line_number: value.line,
            original_line_number: value.original_line,
            diff_hunk: value.diff_hunk,
            commit_sha: value.commit_id,
            in_reply_to_id: value.in_reply_to_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
