//! GitHub pull requests API client.
//!
//! The clients shape requests for the pull request endpoints and hand them to
//! a [`Connection`], which owns authentication, HTTP status mapping, and
//! transport. Every operation is offered as a future through
//! [`PullRequestsClient`] and as a cold stream through
//! [`ObservablePullRequestsClient`]; repositories are addressed either by
//! owner and name or by numeric identifier through [`RepositoryRef`].

pub mod connection;
pub mod error;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod pulls;
pub mod rate_limit;
pub mod repository;
pub mod review_comments;

pub use connection::{
    ApiRequest, ApiResponse, Connection, Method, OctocrabConnection, RequestTarget,
};
pub use error::ApiError;
pub use locator::{GITHUB_API_BASE, PullRequestLocator, RepositoryLocator};
pub use models::requests::{
    ItemState, ItemStateFilter, MergeMethod, MergePullRequest, NewPullRequest,
    PullRequestRequest, PullRequestSort, PullRequestUpdate, SortDirection,
};
pub use models::{
    PullRequest, PullRequestCommit, PullRequestFile, PullRequestMerge, PullRequestRef,
    ReviewComment,
};
pub use pagination::{ApiOptions, MAX_PAGE_SIZE};
pub use pulls::{ObservablePullRequestsClient, PullRequestsClient};
pub use rate_limit::RateLimitInfo;
pub use repository::{
    PersonalAccessToken, PullRequestNumber, RepositoryName, RepositoryOwner, RepositoryRef,
};
pub use review_comments::{
    ObservablePullRequestReviewCommentsClient, PullRequestReviewCommentsClient,
};
