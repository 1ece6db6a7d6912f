//! Behavioural tests for the pull request clients against a mock GitHub API.

#[path = "pull_requests_bdd/mod.rs"]
mod pull_requests_bdd_support;

use futures::TryStreamExt;
use pull_requests_bdd_support::{
    EXPECTED_RATE_LIMIT_RESET_AT, PULLS_PATH, PullRequestState, octo_repo,
};
use pullwright::github::models::test_support::{error_json, pull_request_json};
use pullwright::{ApiError, ApiOptions, PullRequestNumber};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

#[fixture]
fn pull_request_state() -> PullRequestState {
    PullRequestState::default()
}

fn number(value: u64) -> PullRequestNumber {
    PullRequestNumber::new(value).unwrap_or_else(|error| panic!("invalid number: {error}"))
}

/// Pull requests numbered from `total` down to 1, split into pages.
fn descending_pages(total: u32, page_size: usize) -> Vec<Value> {
    let numbers: Vec<u64> = (1..=u64::from(total)).rev().collect();
    numbers
        .chunks(page_size)
        .map(|chunk| {
            Value::Array(
                chunk
                    .iter()
                    .map(|pr| pull_request_json(*pr, &format!("Pull request {pr}")))
                    .collect(),
            )
        })
        .collect()
}

// --- Given steps ---

#[given("a GitHub API serving {total:u32} pull requests for octo/repo in pages of {size:usize}")]
fn seed_paginated_pull_requests(pull_request_state: &PullRequestState, total: u32, size: usize) {
    pull_request_state.runtime();
    let server_uri = pull_request_state.server_uri();
    let pages = descending_pages(total, size);
    let last_page = pages.len();

    for (index, body) in pages.into_iter().enumerate() {
        let page = index + 1;
        let mut response = ResponseTemplate::new(200).set_body_json(body);
        if page < last_page {
            response = response.insert_header(
                "Link",
                format!(
                    "<{server_uri}{PULLS_PATH}?page={}>; rel=\"next\", \
                     <{server_uri}{PULLS_PATH}?page={last_page}>; rel=\"last\"",
                    page + 1
                ),
            );
        }

        let mock = Mock::given(method("GET")).and(path(PULLS_PATH));
        let mock = if page == 1 {
            mock.and(query_param_is_missing("page"))
        } else {
            mock.and(query_param("page", page.to_string()))
        };
        pull_request_state.mount(mock.respond_with(response));
    }
}

#[given("a GitHub API without pull request {number:u64} for octo/repo")]
fn seed_missing_pull_request(pull_request_state: &PullRequestState, number: u64) {
    pull_request_state.mount(
        Mock::given(method("GET"))
            .and(path(format!("{PULLS_PATH}/{number}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(error_json("Not Found"))),
    );
}

#[given("a GitHub API reporting pull request {number:u64} for octo/repo as merged")]
fn seed_merged_pull_request(pull_request_state: &PullRequestState, number: u64) {
    pull_request_state.mount(
        Mock::given(method("GET"))
            .and(path(format!("{PULLS_PATH}/{number}/merge")))
            .respond_with(ResponseTemplate::new(204)),
    );
}

#[given("a GitHub API rejecting octo/repo requests with an exhausted rate limit")]
fn seed_rate_limited_repository(pull_request_state: &PullRequestState) {
    pull_request_state.mount(
        Mock::given(method("GET")).and(path(PULLS_PATH)).respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({
                    "message": "API rate limit exceeded for user",
                    "documentation_url": "https://docs.github.com/rest/rate-limit"
                }))
                .insert_header("X-RateLimit-Limit", "5000")
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header(
                    "X-RateLimit-Reset",
                    EXPECTED_RATE_LIMIT_RESET_AT.to_string(),
                ),
        ),
    );
}

// --- When steps ---

#[when("the client lists the pull requests for octo/repo")]
fn list_pull_requests(pull_request_state: &PullRequestState) {
    let client = pull_request_state.client();
    let result = pull_request_state
        .runtime()
        .block_on(client.get_all_for_repository(&octo_repo()));
    pull_request_state.record_listing(result);
}

#[when("the client lists {pages:u32} page of pull requests for octo/repo")]
fn list_limited_pull_requests(pull_request_state: &PullRequestState, pages: u32) {
    let client = pull_request_state.client();
    let options = ApiOptions::default().with_page_count(pages);
    let result = pull_request_state
        .runtime()
        .block_on(client.get_all_for_repository_with_options(&octo_repo(), options));
    pull_request_state.record_listing(result);
}

#[when("the observable client streams the pull requests for octo/repo")]
fn stream_pull_requests(pull_request_state: &PullRequestState) {
    let observable = pull_request_state.observable();
    let result = pull_request_state.runtime().block_on(
        observable
            .get_all_for_repository(&octo_repo())
            .try_collect::<Vec<_>>(),
    );
    pull_request_state.record_listing(result);
}

#[when("the client fetches pull request {value:u64} for octo/repo")]
fn fetch_pull_request(pull_request_state: &PullRequestState, value: u64) {
    let client = pull_request_state.client();
    let result = pull_request_state
        .runtime()
        .block_on(client.get(&octo_repo(), number(value)));
    pull_request_state.record_listing(result.map(|pr| vec![pr]));
}

#[when("the observable client streams pull request {value:u64} for octo/repo")]
fn stream_pull_request(pull_request_state: &PullRequestState, value: u64) {
    let observable = pull_request_state.observable();
    let result = pull_request_state.runtime().block_on(
        observable
            .get(&octo_repo(), number(value))
            .try_collect::<Vec<_>>(),
    );
    pull_request_state.record_listing(result);
}

#[when("the client checks whether pull request {value:u64} for octo/repo was merged")]
fn check_merged(pull_request_state: &PullRequestState, value: u64) {
    let client = pull_request_state.client();
    match pull_request_state
        .runtime()
        .block_on(client.merged(&octo_repo(), number(value)))
    {
        Ok(merged) => pull_request_state.merged.set(merged),
        Err(error) => pull_request_state.error.set(error),
    }
}

// --- Then steps ---

#[then("pull requests {first:u64} down to {last:u64} are returned in order")]
fn assert_descending_numbers(pull_request_state: &PullRequestState, first: u64, last: u64) {
    let numbers: Vec<u64> = pull_request_state
        .pull_requests
        .with_ref(|pull_requests| pull_requests.iter().map(|pr| pr.number).collect())
        .unwrap_or_else(|| {
            let error = pull_request_state.error.get();
            panic!("pull request listing missing, error: {error:?}")
        });

    let expected: Vec<u64> = (last..=first).rev().collect();
    assert_eq!(numbers, expected, "pull request order mismatch");
}

#[then("the error is a not found error")]
fn assert_not_found(pull_request_state: &PullRequestState) {
    let error = pull_request_state
        .error
        .get()
        .unwrap_or_else(|| panic!("expected an error"));

    match error {
        ApiError::NotFound { message } => assert!(
            message.contains("Not Found"),
            "expected GitHub message to be kept, got `{message}`"
        ),
        other => panic!("expected NotFound variant, got {other:?}"),
    }
}

#[then("the pull request is reported as merged")]
fn assert_merged(pull_request_state: &PullRequestState) {
    let merged = pull_request_state
        .merged
        .get()
        .unwrap_or_else(|| panic!("merged result missing"));
    assert!(merged, "expected the pull request to be merged");
}

#[then("the error reports the rate limit reset time")]
fn assert_rate_limit_reset(pull_request_state: &PullRequestState) {
    let error = pull_request_state
        .error
        .get()
        .unwrap_or_else(|| panic!("expected rate limit error"));

    match &error {
        ApiError::RateLimitExceeded {
            rate_limit,
            message,
        } => {
            assert!(
                message.contains("API rate limit exceeded for user"),
                "unexpected rate limit message `{message}`"
            );
            let Some(info) = rate_limit else {
                panic!("expected rate_limit info to be populated")
            };
            assert_eq!(info.reset_at(), EXPECTED_RATE_LIMIT_RESET_AT);
        }
        other => panic!("expected RateLimitExceeded variant, got {other:?}"),
    }

    let rendered = error.to_string();
    assert!(
        rendered.contains(&EXPECTED_RATE_LIMIT_RESET_AT.to_string()),
        "expected error message to contain reset time, got `{rendered}`"
    );
}

#[scenario(path = "tests/features/pull_requests.feature", index = 0)]
fn list_follows_every_page(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 1)]
fn stream_yields_same_pull_requests(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 2)]
fn page_count_stops_listing(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 3)]
fn fetch_missing_pull_request(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 4)]
fn stream_missing_pull_request(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 5)]
fn check_merged_pull_request(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}

#[scenario(path = "tests/features/pull_requests.feature", index = 6)]
fn rate_limit_exhaustion(pull_request_state: PullRequestState) {
    let _ = pull_request_state;
}
