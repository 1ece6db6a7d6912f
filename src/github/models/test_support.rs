//! JSON fixtures shaped like GitHub pull request payloads.
//!
//! Integration tests mount these on mock servers or return them from stub
//! connections, so every suite agrees on what a realistic payload looks like.
//!
//! # Examples
//!
//! ```
//! use pullwright::github::models::test_support::pull_request_json;
//!
//! let payload = pull_request_json(7, "Tidy docs");
//! assert_eq!(payload["number"], 7);
//! ```

use serde_json::{Value, json};

/// Builds a pull request payload with the given number and title.
#[must_use]
pub fn pull_request_json(number: u64, title: &str) -> Value {
    json!({
        "id": 1_000 + number,
        "number": number,
        "title": title,
        "body": null,
        "state": "open",
        "html_url": format!("https://github.com/octo/repo/pull/{number}"),
        "user": { "login": "octocat" },
        "head": { "label": "octo:topic", "ref": "topic", "sha": "1111111" },
        "base": { "label": "octo:main", "ref": "main", "sha": "2222222" },
        "draft": false,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z",
        "closed_at": null,
        "merged_at": null
    })
}

/// Builds a JSON array of pull request payloads numbered in the given order.
#[must_use]
pub fn pull_request_list_json(numbers: &[u64]) -> Value {
    Value::Array(
        numbers
            .iter()
            .map(|number| pull_request_json(*number, &format!("Pull request {number}")))
            .collect(),
    )
}

/// Builds a pull request commit payload.
#[must_use]
pub fn commit_json(sha: &str, message: &str) -> Value {
    json!({
        "sha": sha,
        "html_url": format!("https://github.com/octo/repo/commit/{sha}"),
        "commit": { "message": message },
        "author": { "login": "octocat" }
    })
}

/// Builds a pull request file payload.
#[must_use]
pub fn file_json(filename: &str, additions: u64, deletions: u64) -> Value {
    json!({
        "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
        "filename": filename,
        "status": "modified",
        "additions": additions,
        "deletions": deletions,
        "changes": additions + deletions,
        "patch": "@@ -1 +1 @@\n-old\n+new"
    })
}

/// Builds the JSON error body GitHub returns alongside failures.
#[must_use]
pub fn error_json(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest/pulls/pulls"
    })
}
