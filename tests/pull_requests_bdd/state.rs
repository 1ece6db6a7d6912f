//! Scenario state and mock server helpers for the pull request BDD tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use pullwright::github::{Connection, PullRequest};
use pullwright::{
    ApiError, ObservablePullRequestsClient, OctocrabConnection, PersonalAccessToken,
    PullRequestsClient, RepositoryRef,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub(crate) const PULLS_PATH: &str = "/api/v3/repos/octo/repo/pulls";
pub(crate) const EXPECTED_RATE_LIMIT_RESET_AT: u64 = 1_700_000_000;

/// Shared runtime wrapper that can be stored in an rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

#[derive(ScenarioState, Default)]
pub(crate) struct PullRequestState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) pull_requests: Slot<Vec<PullRequest>>,
    pub(crate) merged: Slot<bool>,
    pub(crate) error: Slot<ApiError>,
}

impl PullRequestState {
    /// Starts the runtime and mock server on first use.
    pub(crate) fn runtime(&self) -> SharedRuntime {
        if self.runtime.with_ref(|_| ()).is_none() {
            let runtime = Runtime::new()
                .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
            self.runtime.set(SharedRuntime::new(runtime));
        }

        let shared_runtime = self
            .runtime
            .get()
            .unwrap_or_else(|| panic!("runtime not initialised after set"));

        if self.server.with_ref(|_| ()).is_none() {
            self.server
                .set(shared_runtime.block_on(MockServer::start()));
        }

        shared_runtime
    }

    pub(crate) fn server_uri(&self) -> String {
        self.server
            .with_ref(MockServer::uri)
            .unwrap_or_else(|| panic!("mock server not initialised"))
    }

    pub(crate) fn mount(&self, mock: Mock) {
        let runtime = self.runtime();
        self.server
            .with_ref(|server| runtime.block_on(mock.mount(server)))
            .unwrap_or_else(|| panic!("mock server not initialised"));
    }

    /// Future-based client bound to the mock server.
    pub(crate) fn client(&self) -> PullRequestsClient {
        PullRequestsClient::new(self.connection())
    }

    /// Stream-based client bound to the mock server.
    pub(crate) fn observable(&self) -> ObservablePullRequestsClient {
        ObservablePullRequestsClient::new(self.connection())
    }

    /// Stores the outcome of a listing, clearing any earlier outcome.
    pub(crate) fn record_listing(&self, result: Result<Vec<PullRequest>, ApiError>) {
        match result {
            Ok(pull_requests) => {
                let _had_previous_error = self.error.take().is_some();
                self.pull_requests.set(pull_requests);
            }
            Err(error) => {
                let _had_previous_result = self.pull_requests.take().is_some();
                self.error.set(error);
            }
        }
    }

    fn connection(&self) -> Arc<dyn Connection> {
        let runtime = self.runtime();
        let api_base = format!("{}/api/v3", self.server_uri());
        runtime.block_on(async {
            let token = PersonalAccessToken::new("valid-token")
                .unwrap_or_else(|error| panic!("token should be valid: {error}"));
            let connection = OctocrabConnection::for_token(&token, &api_base)
                .unwrap_or_else(|error| panic!("connection should build: {error}"));
            Arc::new(connection) as Arc<dyn Connection>
        })
    }
}

pub(crate) fn octo_repo() -> RepositoryRef {
    RepositoryRef::by_name("octo", "repo")
        .unwrap_or_else(|error| panic!("repository should be valid: {error}"))
}
