//! Review comments on pull requests.
//!
//! Reached through `comment()` on either pull request client. Review comments
//! are attached to a line of a pull request's diff, as opposed to issue
//! comments on the conversation tab.

use std::sync::Arc;

use futures::stream::BoxStream;

use crate::github::connection::{ApiConnection, ApiRequest, Connection};
use crate::github::error::ApiError;
use crate::github::models::{ApiReviewComment, ReviewComment};
use crate::github::pagination::ApiOptions;
use crate::github::repository::{PullRequestNumber, RepositoryRef};

fn comment_request(repository: &RepositoryRef, comment_id: u64) -> ApiRequest {
    ApiRequest::get(repository.join(&format!("pulls/comments/{comment_id}")))
}

fn pull_request_comments(repository: &RepositoryRef, number: PullRequestNumber) -> ApiRequest {
    ApiRequest::get(repository.join(&format!("pulls/{}/comments", number.get())))
}

fn repository_comments(repository: &RepositoryRef) -> ApiRequest {
    ApiRequest::get(repository.join("pulls/comments"))
}

/// Future-based client for pull request review comments.
#[derive(Clone)]
pub struct PullRequestReviewCommentsClient {
    api: ApiConnection,
}

impl PullRequestReviewCommentsClient {
    /// Creates a client that sends requests through `connection`.
    #[must_use]
    pub const fn new(connection: Arc<dyn Connection>) -> Self {
        Self::from_api(ApiConnection::new(connection))
    }

    pub(crate) const fn from_api(api: ApiConnection) -> Self {
        Self { api }
    }

    /// Fetches a single review comment.
    ///
    /// # Errors
    ///
    /// Returns the connection's error unaltered, or
    /// [`ApiError::Deserialisation`] when the payload cannot be decoded.
    pub async fn get(
        &self,
        repository: &RepositoryRef,
        comment_id: u64,
    ) -> Result<ReviewComment, ApiError> {
        self.api
            .send_json::<ApiReviewComment, ReviewComment>(comment_request(repository, comment_id))
            .await
    }

    /// Lists every review comment on a pull request.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page, including
    /// [`ApiError::RateLimitExceeded`] with the quota reset time when known.
    pub async fn get_all(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> Result<Vec<ReviewComment>, ApiError> {
        self.get_all_with_options(repository, number, ApiOptions::default())
            .await
    }

    /// Lists review comments on a pull request within the given page limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] without sending a request when
    /// `options` are out of range, otherwise the first page error.
    pub async fn get_all_with_options(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        options: ApiOptions,
    ) -> Result<Vec<ReviewComment>, ApiError> {
        self.api
            .get_all::<ApiReviewComment, ReviewComment>(
                pull_request_comments(repository, number),
                options,
            )
            .await
    }

    /// Lists every review comment across the repository's pull requests.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub async fn get_all_for_repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Vec<ReviewComment>, ApiError> {
        self.get_all_for_repository_with_options(repository, ApiOptions::default())
            .await
    }

    /// Lists repository review comments within the given page limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] without sending a request when
    /// `options` are out of range, otherwise the first page error.
    pub async fn get_all_for_repository_with_options(
        &self,
        repository: &RepositoryRef,
        options: ApiOptions,
    ) -> Result<Vec<ReviewComment>, ApiError> {
        self.api
            .get_all::<ApiReviewComment, ReviewComment>(repository_comments(repository), options)
            .await
    }
}

/// Stream-based client for pull request review comments.
#[derive(Clone)]
pub struct ObservablePullRequestReviewCommentsClient {
    api: ApiConnection,
}

impl ObservablePullRequestReviewCommentsClient {
    /// Creates a client that sends requests through `connection`.
    #[must_use]
    pub const fn new(connection: Arc<dyn Connection>) -> Self {
        Self::from_api(ApiConnection::new(connection))
    }

    pub(crate) const fn from_api(api: ApiConnection) -> Self {
        Self { api }
    }

    /// Streams a single review comment.
    #[must_use]
    pub fn get(
        &self,
        repository: &RepositoryRef,
        comment_id: u64,
    ) -> BoxStream<'static, Result<ReviewComment, ApiError>> {
        self.api
            .stream_one::<ApiReviewComment, ReviewComment>(Ok(comment_request(repository, comment_id)))
    }

    /// Streams every review comment on a pull request.
    #[must_use]
    pub fn get_all(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> BoxStream<'static, Result<ReviewComment, ApiError>> {
        self.get_all_with_options(repository, number, ApiOptions::default())
    }

    /// Streams review comments on a pull request within the given page limits.
    #[must_use]
    pub fn get_all_with_options(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        options: ApiOptions,
    ) -> BoxStream<'static, Result<ReviewComment, ApiError>> {
        self.api.stream_all::<ApiReviewComment, ReviewComment>(
            pull_request_comments(repository, number),
            options,
        )
    }

    /// Streams every review comment across the repository's pull requests.
    #[must_use]
    pub fn get_all_for_repository(
        &self,
        repository: &RepositoryRef,
    ) -> BoxStream<'static, Result<ReviewComment, ApiError>> {
        self.get_all_for_repository_with_options(repository, ApiOptions::default())
    }

    /// Streams repository review comments within the given page limits.
    #[must_use]
    pub fn get_all_for_repository_with_options(
        &self,
        repository: &RepositoryRef,
        options: ApiOptions,
    ) -> BoxStream<'static, Result<ReviewComment, ApiError>> {
        self.api
            .stream_all::<ApiReviewComment, ReviewComment>(repository_comments(repository), options)
    }
}
