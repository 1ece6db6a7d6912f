//! Tests for the Octocrab connection and the shared pager.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ApiConnection, ApiRequest, Connection, OctocrabConnection};
use crate::github::error::ApiError;
use crate::github::models::test_support::{error_json, pull_request_list_json};
use crate::github::models::{ApiPullRequest, PullRequest};
use crate::github::pagination::ApiOptions;
use crate::github::repository::PersonalAccessToken;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

const EXPECTED_RATE_LIMIT_RESET_AT: u64 = 1_700_000_000;
const PULLS_PATH: &str = "/api/v3/repos/owner/repo/pulls";

#[derive(Debug, Default)]
struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .expect("events mutex should be available")
            .drain(..)
            .collect()
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .expect("events mutex should be available")
            .push(event);
    }
}

struct ConnectionFixture {
    runtime: Runtime,
    server: MockServer,
    connection: Arc<OctocrabConnection>,
    telemetry: Arc<RecordingSink>,
}

impl ConnectionFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.server));
    }

    fn send(&self, request: ApiRequest) -> Result<super::ApiResponse, ApiError> {
        self.block_on(self.connection.send(request))
    }
}

#[fixture]
fn connection_fixture() -> FixtureResult<ConnectionFixture> {
    let token = PersonalAccessToken::new("valid-token")?;
    let runtime = Runtime::new()?;
    let server = runtime.block_on(MockServer::start());
    let telemetry = Arc::new(RecordingSink::default());
    let _guard = runtime.enter();
    let connection = OctocrabConnection::for_token(&token, &format!("{}/api/v3", server.uri()))?
        .with_telemetry(Arc::clone(&telemetry) as Arc<dyn TelemetrySink>);
    Ok(ConnectionFixture {
        runtime,
        server,
        connection: Arc::new(connection),
        telemetry,
    })
}

#[rstest]
fn send_encodes_query_and_reads_next_link(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    let next = format!("{}{PULLS_PATH}?state=all&page=2", fixture.server.uri());
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("state", "all"))
            .and(query_param("head", "octo:topic branch"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{next}>; rel=\"next\"").as_str())
                    .set_body_json(pull_request_list_json(&[1])),
            ),
    );

    let response = fixture
        .send(ApiRequest::get("/repos/owner/repo/pulls").with_query([
            ("state".to_owned(), "all".to_owned()),
            ("head".to_owned(), "octo:topic branch".to_owned()),
        ]))
        .expect("request should succeed");

    assert_eq!(response.status, 200);
    assert_eq!(response.next_page.as_deref(), Some(next.as_str()));
    assert_eq!(
        fixture.telemetry.take(),
        vec![TelemetryEvent::RequestCompleted {
            method: "GET".to_owned(),
            path: "/repos/owner/repo/pulls".to_owned(),
            status: 200,
        }]
    );
}

#[rstest]
fn send_posts_json_body(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    let payload = json!({ "title": "Add feature", "head": "topic", "base": "main" });
    fixture.mount(
        Mock::given(method("POST"))
            .and(path(PULLS_PATH))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "number": 3 }))),
    );

    let response = fixture
        .send(ApiRequest::post("/repos/owner/repo/pulls", payload))
        .expect("request should succeed");

    assert_eq!(response.status, 201);
    assert_eq!(response.body, json!({ "number": 3 }));
}

#[rstest]
fn empty_no_content_body_decodes_as_null(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/7/merge"))
            .respond_with(ResponseTemplate::new(204)),
    );

    let response = fixture
        .send(ApiRequest::get("/repos/owner/repo/pulls/7/merge"))
        .expect("request should succeed");

    assert_eq!(response.status, 204);
    assert!(response.body.is_null());
}

#[rstest]
#[case::unauthorised(401, "Bad credentials")]
#[case::not_found(404, "Not Found")]
#[case::validation(422, "Validation Failed")]
#[case::server_error(502, "Bad Gateway")]
fn error_statuses_keep_github_message(
    connection_fixture: FixtureResult<ConnectionFixture>,
    #[case] status: u16,
    #[case] message: &str,
) {
    let fixture = connection_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repos/owner/repo/pulls/9"))
            .respond_with(ResponseTemplate::new(status).set_body_json(error_json(message))),
    );

    let error = fixture
        .send(ApiRequest::get("/repos/owner/repo/pulls/9"))
        .expect_err("request should fail");

    let variant_matches = match status {
        401 => matches!(error, ApiError::Authentication { .. }),
        404 => matches!(error, ApiError::NotFound { .. }),
        422 => matches!(error, ApiError::Validation { .. }),
        _ => matches!(error, ApiError::Api { status: Some(502), .. }),
    };
    assert!(variant_matches, "unexpected error for {status}: {error:?}");
    assert!(
        error.to_string().contains(message),
        "expected `{message}` in `{error}`"
    );
}

#[rstest]
fn rate_limit_errors_carry_reset_time(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "API rate limit exceeded for user",
                "documentation_url": "https://docs.github.com/rest/rate-limit"
            }))),
    );
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/rate_limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": {
                    "core": { "limit": 5000, "used": 5000, "remaining": 0, "reset": EXPECTED_RATE_LIMIT_RESET_AT },
                    "search": { "limit": 30, "used": 0, "remaining": 30, "reset": EXPECTED_RATE_LIMIT_RESET_AT }
                },
                "rate": { "limit": 5000, "used": 5000, "remaining": 0, "reset": EXPECTED_RATE_LIMIT_RESET_AT }
            }))),
    );

    let error = fixture
        .send(ApiRequest::get("/repos/owner/repo/pulls"))
        .expect_err("request should fail");

    match error {
        ApiError::RateLimitExceeded {
            rate_limit,
            message,
        } => {
            let info = rate_limit.expect("expected rate_limit info to be populated");
            assert_eq!(info.reset_at(), EXPECTED_RATE_LIMIT_RESET_AT);
            assert!(
                message.contains(&EXPECTED_RATE_LIMIT_RESET_AT.to_string()),
                "expected message to include reset time, got `{message}`"
            );
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }

    assert!(
        fixture.telemetry.take().contains(&TelemetryEvent::RateLimited {
            reset_at: Some(EXPECTED_RATE_LIMIT_RESET_AT),
        }),
        "expected a rate limit telemetry event"
    );
}

#[rstest]
fn rate_limit_headers_skip_the_quota_lookup(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-ratelimit-limit", "60")
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1700000123")
                    .set_body_json(error_json("You have exceeded a secondary rate limit")),
            ),
    );
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/rate_limit"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0),
    );

    let error = fixture
        .send(ApiRequest::get("/repos/owner/repo/pulls"))
        .expect_err("request should fail");

    let ApiError::RateLimitExceeded { rate_limit, .. } = error else {
        panic!("expected RateLimitExceeded, got {error:?}");
    };
    assert_eq!(rate_limit.map(|info| info.reset_at()), Some(1_700_000_123));
}

#[rstest]
fn pager_follows_link_headers_across_pages(connection_fixture: FixtureResult<ConnectionFixture>) {
    let fixture = connection_fixture.expect("fixture should succeed");
    let second_page = format!("{}/api/v3/repositories/42/pulls?page=2", fixture.server.uri());
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repositories/42/pulls"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pull_request_list_json(&[3]))),
    );
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/api/v3/repositories/42/pulls"))
            .and(query_param("per_page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", format!("<{second_page}>; rel=\"next\"").as_str())
                    .set_body_json(pull_request_list_json(&[1, 2])),
            ),
    );

    let api = ApiConnection::new(Arc::clone(&fixture.connection) as Arc<dyn Connection>);
    let pulls = fixture
        .block_on(api.get_all::<ApiPullRequest, PullRequest>(
            ApiRequest::get("/repositories/42/pulls"),
            ApiOptions::default().with_page_size(2),
        ))
        .expect("listing should succeed");

    let numbers: Vec<u64> = pulls.iter().map(|pull| pull.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}
