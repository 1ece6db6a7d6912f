//! Shared test utilities for CLI tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pullwright::ApiError;
use pullwright::github::{ApiRequest, ApiResponse, Connection};

/// A stub connection that captures requests and replays queued responses.
#[derive(Clone, Default)]
pub struct CapturingConnection {
    /// Requests received, in order.
    pub captured: Arc<Mutex<Vec<ApiRequest>>>,
    /// Responses to return, consumed front to back.
    pub responses: Arc<Mutex<VecDeque<Result<ApiResponse, ApiError>>>>,
}

impl CapturingConnection {
    /// Creates a connection that replays `responses` in order.
    #[must_use]
    pub fn replaying(responses: impl IntoIterator<Item = Result<ApiResponse, ApiError>>) -> Self {
        Self {
            captured: Arc::default(),
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
        }
    }

    /// Method and target of each captured request.
    #[must_use]
    pub fn described_requests(&self) -> Vec<String> {
        self.captured
            .lock()
            .expect("captured mutex should be available")
            .iter()
            .map(ApiRequest::describe)
            .collect()
    }
}

#[async_trait]
impl Connection for CapturingConnection {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.captured
            .lock()
            .expect("captured mutex should be available")
            .push(request);

        self.responses
            .lock()
            .expect("response mutex should be available")
            .pop_front()
            .expect("a response should be queued for every request")
    }
}
