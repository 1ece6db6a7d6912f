//! Stream-based surface of the pull requests API.

use std::sync::Arc;

use futures::stream::BoxStream;

use crate::github::connection::{ApiConnection, Connection};
use crate::github::error::ApiError;
use crate::github::models::requests::{
    MergePullRequest, NewPullRequest, PullRequestRequest, PullRequestUpdate,
};
use crate::github::models::{
    ApiPullRequest, ApiPullRequestCommit, ApiPullRequestFile, ApiPullRequestMerge, PullRequest,
    PullRequestCommit, PullRequestFile, PullRequestMerge,
};
use crate::github::pagination::ApiOptions;
use crate::github::repository::{PullRequestNumber, RepositoryRef};
use crate::github::review_comments::ObservablePullRequestReviewCommentsClient;

use super::endpoints;

/// Stream-based client for the pull requests API.
///
/// Every operation returns a cold stream: nothing is sent until the stream is
/// first polled and each new stream repeats the request. Single-result
/// operations yield exactly one item. Listings yield items page by page as
/// they arrive and end after the last page. An error is yielded once and ends
/// the stream.
#[derive(Clone)]
pub struct ObservablePullRequestsClient {
    api: ApiConnection,
    comments: ObservablePullRequestReviewCommentsClient,
}

impl ObservablePullRequestsClient {
    /// Creates a client that sends requests through `connection`.
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self::from_api(ApiConnection::new(connection))
    }

    pub(super) fn from_api(api: ApiConnection) -> Self {
        Self {
            comments: ObservablePullRequestReviewCommentsClient::from_api(api.clone()),
            api,
        }
    }

    /// Review comments on pull requests.
    #[must_use]
    pub const fn comment(&self) -> &ObservablePullRequestReviewCommentsClient {
        &self.comments
    }

    /// Streams a single pull request.
    #[must_use]
    pub fn get(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.api
            .stream_one::<ApiPullRequest, PullRequest>(Ok(endpoints::get(repository, number)))
    }

    /// Streams open pull requests, newest first.
    #[must_use]
    pub fn get_all_for_repository(
        &self,
        repository: &RepositoryRef,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            &PullRequestRequest::default(),
            ApiOptions::default(),
        )
    }

    /// Streams open pull requests within the given page limits.
    #[must_use]
    pub fn get_all_for_repository_with_options(
        &self,
        repository: &RepositoryRef,
        options: ApiOptions,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            &PullRequestRequest::default(),
            options,
        )
    }

    /// Streams pull requests matching `request`.
    #[must_use]
    pub fn get_all_for_repository_with_request(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            request,
            ApiOptions::default(),
        )
    }

    /// Streams pull requests matching `request` within the given page limits.
    ///
    /// Out-of-range `options` produce a single
    /// [`ApiError::InvalidPagination`] item without contacting GitHub.
    #[must_use]
    pub fn get_all_for_repository_with_request_and_options(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
        options: ApiOptions,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.api
            .stream_all::<ApiPullRequest, PullRequest>(endpoints::list(repository, request), options)
    }

    /// Opens a pull request when polled.
    #[must_use]
    pub fn create(
        &self,
        repository: &RepositoryRef,
        new_pull_request: &NewPullRequest,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.api
            .stream_one::<ApiPullRequest, PullRequest>(endpoints::create(
                repository,
                new_pull_request,
            ))
    }

    /// Updates a pull request when polled.
    #[must_use]
    pub fn update(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        changes: &PullRequestUpdate,
    ) -> BoxStream<'static, Result<PullRequest, ApiError>> {
        self.api
            .stream_one::<ApiPullRequest, PullRequest>(endpoints::update(
                repository, number, changes,
            ))
    }

    /// Merges a pull request when polled.
    #[must_use]
    pub fn merge(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        options: &MergePullRequest,
    ) -> BoxStream<'static, Result<PullRequestMerge, ApiError>> {
        self.api
            .stream_one::<ApiPullRequestMerge, PullRequestMerge>(endpoints::merge(
                repository, number, options,
            ))
    }

    /// Streams whether a pull request has been merged.
    #[must_use]
    pub fn merged(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> BoxStream<'static, Result<bool, ApiError>> {
        self.api
            .stream_no_content(endpoints::merged(repository, number))
    }

    /// Streams the commits on a pull request.
    #[must_use]
    pub fn commits(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> BoxStream<'static, Result<PullRequestCommit, ApiError>> {
        self.api.stream_all::<ApiPullRequestCommit, PullRequestCommit>(
            endpoints::commits(repository, number),
            ApiOptions::default(),
        )
    }

    /// Streams the files changed by a pull request.
    #[must_use]
    pub fn files(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> BoxStream<'static, Result<PullRequestFile, ApiError>> {
        self.api.stream_all::<ApiPullRequestFile, PullRequestFile>(
            endpoints::files(repository, number),
            ApiOptions::default(),
        )
    }
}
