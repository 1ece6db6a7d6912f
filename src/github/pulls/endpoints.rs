//! Request builders for the pull request endpoints.
//!
//! Both client surfaces build their requests here, so a future call and a
//! stream call for the same operation always send the same request.

use serde::Serialize;
use serde_json::Value;

use crate::github::connection::ApiRequest;
use crate::github::error::ApiError;
use crate::github::models::requests::{
    MergePullRequest, NewPullRequest, PullRequestRequest, PullRequestUpdate,
};
use crate::github::repository::{PullRequestNumber, RepositoryRef};

fn pull_path(repository: &RepositoryRef, number: PullRequestNumber) -> String {
    repository.join(&format!("pulls/{}", number.get()))
}

fn to_body<P: Serialize>(operation: &str, payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|error| ApiError::InvalidArgument {
        message: format!("{operation} payload could not be encoded: {error}"),
    })
}

pub(crate) fn get(repository: &RepositoryRef, number: PullRequestNumber) -> ApiRequest {
    ApiRequest::get(pull_path(repository, number))
}

pub(crate) fn list(repository: &RepositoryRef, request: &PullRequestRequest) -> ApiRequest {
    ApiRequest::get(repository.join("pulls")).with_query(request.query_parameters())
}

pub(crate) fn create(
    repository: &RepositoryRef,
    new_pull_request: &NewPullRequest,
) -> Result<ApiRequest, ApiError> {
    new_pull_request.validate()?;
    let body = to_body("create pull request", new_pull_request)?;
    Ok(ApiRequest::post(repository.join("pulls"), body))
}

pub(crate) fn update(
    repository: &RepositoryRef,
    number: PullRequestNumber,
    changes: &PullRequestUpdate,
) -> Result<ApiRequest, ApiError> {
    changes.validate()?;
    let body = to_body("update pull request", changes)?;
    Ok(ApiRequest::patch(pull_path(repository, number), body))
}

pub(crate) fn merge(
    repository: &RepositoryRef,
    number: PullRequestNumber,
    options: &MergePullRequest,
) -> Result<ApiRequest, ApiError> {
    let body = to_body("merge pull request", options)?;
    Ok(ApiRequest::put(
        format!("{}/merge", pull_path(repository, number)),
        body,
    ))
}

pub(crate) fn merged(repository: &RepositoryRef, number: PullRequestNumber) -> ApiRequest {
    ApiRequest::get(format!("{}/merge", pull_path(repository, number)))
}

pub(crate) fn commits(repository: &RepositoryRef, number: PullRequestNumber) -> ApiRequest {
    ApiRequest::get(format!("{}/commits", pull_path(repository, number)))
}

pub(crate) fn files(repository: &RepositoryRef, number: PullRequestNumber) -> ApiRequest {
    ApiRequest::get(format!("{}/files", pull_path(repository, number)))
}
