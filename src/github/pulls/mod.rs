//! Pull request operations on a repository.
//!
//! [`PullRequestsClient`] resolves each call to a single result;
//! [`ObservablePullRequestsClient`] exposes the same operations as cold
//! streams. Both build their requests through the same endpoint functions and
//! send them through the same [`Connection`], so failures reported by the
//! connection reach the caller unaltered on either surface.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pullwright::github::{
//!     OctocrabConnection, PersonalAccessToken, PullRequestNumber, PullRequestsClient,
//!     RepositoryRef,
//! };
//!
//! # async fn run() -> Result<(), pullwright::github::ApiError> {
//! let token = PersonalAccessToken::new("ghp_example")?;
//! let connection = OctocrabConnection::for_token(&token, "https://api.github.com")?;
//! let client = PullRequestsClient::new(Arc::new(connection));
//!
//! let repository = RepositoryRef::by_name("octo", "repo")?;
//! let pull = client.get(&repository, PullRequestNumber::new(42)?).await?;
//! assert_eq!(pull.number, 42);
//! # Ok(())
//! # }
//! ```

mod endpoints;
mod observable;

pub use observable::ObservablePullRequestsClient;

use std::sync::Arc;

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
use crate::github::review_comments::PullRequestReviewCommentsClient;

/// Future-based client for the pull requests API.
///
/// Each operation accepts a [`RepositoryRef`], so every call works with both
/// owner/name and numeric repository identifiers.
#[derive(Clone)]
pub struct PullRequestsClient {
    api: ApiConnection,
    comments: PullRequestReviewCommentsClient,
}

impl PullRequestsClient {
    /// Creates a client that sends requests through `connection`.
    #[must_use]
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        let api = ApiConnection::new(connection);
        Self {
            comments: PullRequestReviewCommentsClient::from_api(api.clone()),
            api,
        }
    }

    /// Returns the stream-based view of this client, sharing its connection.
    #[must_use]
    pub fn observable(&self) -> ObservablePullRequestsClient {
        ObservablePullRequestsClient::from_api(self.api.clone())
    }

    /// Review comments on pull requests.
    #[must_use]
    pub const fn comment(&self) -> &PullRequestReviewCommentsClient {
        &self.comments
    }

    /// Fetches a single pull request.
    ///
    /// # Errors
    ///
    /// Returns the connection's error unaltered, or
    /// [`ApiError::Deserialisation`] when the payload cannot be decoded.
    pub async fn get(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> Result<PullRequest, ApiError> {
        self.api
            .send_json::<ApiPullRequest, PullRequest>(endpoints::get(repository, number))
            .await
    }

    /// Lists open pull requests, newest first, following every page.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub async fn get_all_for_repository(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Vec<PullRequest>, ApiError> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            &PullRequestRequest::default(),
            ApiOptions::default(),
        )
        .await
    }

    /// Lists open pull requests using the given page size and page limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] without sending a request when
    /// `options` are out of range, otherwise the first page error.
    pub async fn get_all_for_repository_with_options(
        &self,
        repository: &RepositoryRef,
        options: ApiOptions,
    ) -> Result<Vec<PullRequest>, ApiError> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            &PullRequestRequest::default(),
            options,
        )
        .await
    }

    /// Lists pull requests matching `request`, following every page.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub async fn get_all_for_repository_with_request(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
    ) -> Result<Vec<PullRequest>, ApiError> {
        self.get_all_for_repository_with_request_and_options(
            repository,
            request,
            ApiOptions::default(),
        )
        .await
    }

    /// Lists pull requests matching `request` within the given page limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] without sending a request when
    /// `options` are out of range, otherwise the first page error.
    pub async fn get_all_for_repository_with_request_and_options(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
        options: ApiOptions,
    ) -> Result<Vec<PullRequest>, ApiError> {
        self.api
            .get_all::<ApiPullRequest, PullRequest>(endpoints::list(repository, request), options)
            .await
    }

    /// Opens a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for a blank title or branch,
    /// otherwise the connection's error unaltered (e.g.
    /// [`ApiError::Validation`] when the branches have no differences).
    pub async fn create(
        &self,
        repository: &RepositoryRef,
        new_pull_request: &NewPullRequest,
    ) -> Result<PullRequest, ApiError> {
        let request = endpoints::create(repository, new_pull_request)?;
        self.api
            .send_json::<ApiPullRequest, PullRequest>(request)
            .await
    }

    /// Changes the title, body, state, or base of a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] when `changes` is empty,
    /// otherwise the connection's error unaltered.
    pub async fn update(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        changes: &PullRequestUpdate,
    ) -> Result<PullRequest, ApiError> {
        let request = endpoints::update(repository, number, changes)?;
        self.api
            .send_json::<ApiPullRequest, PullRequest>(request)
            .await
    }

    /// Merges a pull request.
    ///
    /// # Errors
    ///
    /// Returns the connection's error unaltered, for example
    /// [`ApiError::Api`] with status `405` when the pull request is not
    /// mergeable.
    pub async fn merge(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
        options: &MergePullRequest,
    ) -> Result<PullRequestMerge, ApiError> {
        let request = endpoints::merge(repository, number, options)?;
        self.api
            .send_json::<ApiPullRequestMerge, PullRequestMerge>(request)
            .await
    }

    /// Reports whether a pull request has been merged.
    ///
    /// GitHub answers `204` for merged pull requests and `404` otherwise.
    ///
    /// # Errors
    ///
    /// Returns any connection error other than [`ApiError::NotFound`].
    pub async fn merged(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> Result<bool, ApiError> {
        self.api
            .no_content(endpoints::merged(repository, number))
            .await
    }

    /// Lists the commits on a pull request.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub async fn commits(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> Result<Vec<PullRequestCommit>, ApiError> {
        self.api
            .get_all::<ApiPullRequestCommit, PullRequestCommit>(
                endpoints::commits(repository, number),
                ApiOptions::default(),
            )
            .await
    }

    /// Lists the files changed by a pull request.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub async fn files(
        &self,
        repository: &RepositoryRef,
        number: PullRequestNumber,
    ) -> Result<Vec<PullRequestFile>, ApiError> {
        self.api
            .get_all::<ApiPullRequestFile, PullRequestFile>(
                endpoints::files(repository, number),
                ApiOptions::default(),
            )
            .await
    }
}
