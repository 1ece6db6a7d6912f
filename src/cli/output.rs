//! Line-oriented output for pull request results.

use std::io::{self, Write};

use pullwright::ApiError;
use pullwright::github::{PullRequest, PullRequestCommit, PullRequestFile, ReviewComment};

/// Writes a one-line summary of a pull request.
///
/// # Errors
///
/// Returns [`ApiError::Io`] if writing fails.
pub fn write_pull_request<W: Write>(writer: &mut W, pr: &PullRequest) -> Result<(), ApiError> {
    let title = pr.title.as_deref().unwrap_or("(no title)");
    let state = pr.state.as_deref().unwrap_or("unknown");
    let author = pr.author.as_deref().unwrap_or("unknown");
    let draft = if pr.draft { " draft" } else { "" };
    writeln!(writer, "#{} [{state}{draft}] {title} (@{author})", pr.number)
        .map_err(|e| io_error(&e))
}

/// Writes whether a pull request has been merged.
///
/// # Errors
///
/// Returns [`ApiError::Io`] if writing fails.
pub fn write_merged<W: Write>(writer: &mut W, number: u64, merged: bool) -> Result<(), ApiError> {
    let verdict = if merged { "merged" } else { "not merged" };
    writeln!(writer, "#{number} {verdict}").map_err(|e| io_error(&e))
}

/// Writes a commit as its short SHA and the first line of its message.
///
/// # Errors
///
/// Returns [`ApiError::Io`] if writing fails.
pub fn write_commit<W: Write>(writer: &mut W, commit: &PullRequestCommit) -> Result<(), ApiError> {
    let short_sha = commit.sha.get(..7).unwrap_or(&commit.sha);
    let subject = commit
        .message
        .as_deref()
        .and_then(|message| message.lines().next())
        .unwrap_or("");
    writeln!(writer, "{short_sha} {subject}").map_err(|e| io_error(&e))
}

/// Writes a changed file with its line counts.
///
/// # Errors
///
/// Returns [`ApiError::Io`] if writing fails.
pub fn write_file<W: Write>(writer: &mut W, file: &PullRequestFile) -> Result<(), ApiError> {
    let status = file.status.as_deref().unwrap_or("modified");
    writeln!(
        writer,
        "{status} {} (+{} -{})",
        file.filename, file.additions, file.deletions
    )
    .map_err(|e| io_error(&e))
}

/// Writes a review comment with its location.
///
/// # Errors
///
/// Returns [`ApiError::Io`] if writing fails.
pub fn write_comment<W: Write>(writer: &mut W, comment: &ReviewComment) -> Result<(), ApiError> {
    let author = comment.author.as_deref().unwrap_or("unknown");
    let location = match (comment.file_path.as_deref(), comment.line_number) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_owned(),
        (None, _) => "(no file)".to_owned(),
    };
    let body = comment.body.as_deref().unwrap_or("");
    writeln!(writer, "{} {location} @{author}: {body}", comment.id).map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`ApiError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ApiError {
    ApiError::Io {
        message: error.to_string(),
    }
}
