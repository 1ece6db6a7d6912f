//! Support modules for the pull request BDD tests.

pub(crate) mod state;

pub(crate) use state::{EXPECTED_RATE_LIMIT_RESET_AT, PULLS_PATH, PullRequestState, octo_repo};
