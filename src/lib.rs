//! Pullwright library crate: a client for the GitHub pull requests API.
//!
//! Pull requests can be fetched, listed, opened, updated, and merged, along
//! with their commits, changed files, and review comments. Each operation is
//! available both as a future resolving once and as a cold stream, backed by
//! a pluggable [`github::Connection`]. Configuration for the `pullwright`
//! binary lives in [`config`].

pub mod config;
pub mod github;
pub mod telemetry;

pub use config::{Operation, PullwrightConfig};
pub use github::{
    ApiError, ApiOptions, ObservablePullRequestsClient, OctocrabConnection, PersonalAccessToken,
    PullRequestNumber, PullRequestsClient, RepositoryRef,
};
