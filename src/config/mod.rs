//! Configuration for the `pullwright` binary, loaded from CLI, environment,
//! and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pullwright.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PULLWRIGHT_OWNER`, `PULLWRIGHT_TOKEN`, or
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--owner`/`-o`, `--token`/`-t`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! owner = "octocat"
//! repo = "hello-world"
//! operation = "list"
//! state = "all"
//! page_size = 50
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::ApiError;
use crate::github::locator::{GITHUB_API_BASE, PullRequestLocator, RepositoryLocator};
use crate::github::models::requests::{ItemStateFilter, PullRequestRequest};
use crate::github::pagination::ApiOptions;
use crate::github::repository::{PersonalAccessToken, PullRequestNumber, RepositoryRef};

/// Pull request operation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch a single pull request.
    Get,
    /// List the repository's pull requests.
    List,
    /// Report whether a pull request has been merged.
    Merged,
    /// List the commits on a pull request.
    Commits,
    /// List the files changed by a pull request.
    Files,
    /// List the review comments on a pull request.
    Comments,
}

impl Operation {
    /// Name accepted by `--operation`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Merged => "merged",
            Self::Commits => "commits",
            Self::Files => "files",
            Self::Comments => "comments",
        }
    }

    /// Returns true when the operation targets a single pull request.
    #[must_use]
    pub const fn needs_number(&self) -> bool {
        !matches!(self, Self::List)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "list" => Ok(Self::List),
            "merged" => Ok(Self::Merged),
            "commits" => Ok(Self::Commits),
            "files" => Ok(Self::Files),
            "comments" => Ok(Self::Comments),
            other => Err(ApiError::Configuration {
                message: format!(
                    "unknown operation `{other}` (expected get, list, merged, commits, files, or comments)"
                ),
            }),
        }
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `PULLWRIGHT_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `PULLWRIGHT_PR_URL` or `--pr-url`: Pull request or repository URL
/// - `PULLWRIGHT_OWNER` / `PULLWRIGHT_REPO`: Repository owner and name
/// - `PULLWRIGHT_REPOSITORY_ID` or `--repository-id`: Numeric repository id
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pullwright::PullwrightConfig;
///
/// let config = PullwrightConfig::load().expect("failed to load configuration");
/// let repository = config.repository_ref().expect("repository required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PULLWRIGHT",
    discovery(
        dotfile_name = ".pullwright.toml",
        config_file_name = "pullwright.toml",
        app_name = "pullwright"
    )
)]
pub struct PullwrightConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PULLWRIGHT_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise installations.
    ///
    /// Defaults to the host of `pr_url` when set, otherwise
    /// `https://api.github.com`.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Pull request or repository URL identifying the target.
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Repository owner (e.g., "octocat").
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Numeric repository identifier, used instead of owner and name.
    #[ortho_config()]
    pub repository_id: Option<u64>,

    /// Pull request number.
    #[ortho_config(cli_short = 'n')]
    pub number: Option<u64>,

    /// Operation to run: `get`, `list`, `merged`, `commits`, `files`, or
    /// `comments`.
    #[ortho_config(cli_short = 'x')]
    pub operation: Option<String>,

    /// State filter for `list`: `open`, `closed`, or `all`.
    #[ortho_config()]
    pub state: Option<String>,

    /// Items per page (1-100).
    #[ortho_config()]
    pub page_size: Option<u8>,

    /// Maximum number of pages to fetch.
    #[ortho_config()]
    pub page_count: Option<u32>,

    /// First page to fetch.
    #[ortho_config()]
    pub start_page: Option<u32>,

    /// Prints items as each page arrives using the stream-based client.
    ///
    /// Can be provided via:
    /// - CLI: `--stream` / `-l`
    /// - Config file: `stream = true`
    #[ortho_config(cli_short = 'l')]
    pub stream: bool,

    /// Writes request telemetry to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl PullwrightConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when no token source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, ApiError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(ApiError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// API base URL: explicit `api_base`, else derived from `pr_url`, else
    /// public GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when `pr_url` cannot be parsed.
    pub fn api_base(&self) -> Result<String, ApiError> {
        if let Some(api_base) = &self.api_base {
            return Ok(api_base.clone());
        }
        self.pr_url.as_deref().map_or_else(
            || Ok(GITHUB_API_BASE.to_owned()),
            |url| parse_target(url).map(|target| target.api_base),
        )
    }

    /// Repository addressed by `pr_url`, `repository_id`, or `owner`/`repo`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when no repository is configured
    /// or when more than one of `pr_url`, `repository_id`, and
    /// `owner`/`repo` is set, and [`ApiError::InvalidUrl`] for a malformed
    /// `pr_url`.
    pub fn repository_ref(&self) -> Result<RepositoryRef, ApiError> {
        let has_name = self.owner.is_some() || self.repo.is_some();
        if let Some(url) = self.pr_url.as_deref() {
            if has_name || self.repository_id.is_some() {
                return Err(ApiError::Configuration {
                    message: "--pr-url cannot be combined with --owner/--repo or --repository-id"
                        .to_owned(),
                });
            }
            return Ok(parse_target(url)?.repository);
        }

        match (self.repository_id, has_name) {
            (Some(_), true) => Err(ApiError::Configuration {
                message: "use either --repository-id or --owner/--repo, not both".to_owned(),
            }),
            (Some(id), false) => Ok(RepositoryRef::by_id(id)),
            (None, _) => match (&self.owner, &self.repo) {
                (Some(owner), Some(repo)) => RepositoryRef::by_name(owner, repo),
                (None, _) => Err(ApiError::Configuration {
                    message: "repository owner is required (use --owner or -o)".to_owned(),
                }),
                (_, None) => Err(ApiError::Configuration {
                    message: "repository name is required (use --repo or -r)".to_owned(),
                }),
            },
        }
    }

    /// Pull request number from `number` or from a pull request `pr_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when neither source provides a
    /// number, [`ApiError::InvalidPullRequestNumber`] for zero, or the
    /// parse error of a malformed `pr_url`.
    pub fn pull_request_number(&self) -> Result<PullRequestNumber, ApiError> {
        if let Some(number) = self.number {
            return PullRequestNumber::new(number);
        }
        let url_target = self.pr_url.as_deref().map(parse_target).transpose()?;
        url_target
            .and_then(|parsed| parsed.number)
            .ok_or_else(|| ApiError::Configuration {
                message: "pull request number is required (use --number or --pr-url)".to_owned(),
            })
    }

    /// Pagination options from `page_size`, `page_count`, and `start_page`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidPagination`] when a value is out of range.
    pub fn api_options(&self) -> Result<ApiOptions, ApiError> {
        let mut options = ApiOptions::default();
        if let Some(page_size) = self.page_size {
            options = options.with_page_size(page_size);
        }
        if let Some(page_count) = self.page_count {
            options = options.with_page_count(page_count);
        }
        if let Some(start_page) = self.start_page {
            options = options.with_start_page(start_page);
        }
        options.validate()?;
        Ok(options)
    }

    /// List filter built from `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for an unknown state.
    pub fn pull_request_request(&self) -> Result<PullRequestRequest, ApiError> {
        let state = match self.state.as_deref().map(str::trim) {
            None | Some("open") => ItemStateFilter::Open,
            Some("closed") => ItemStateFilter::Closed,
            Some("all") => ItemStateFilter::All,
            Some(other) => {
                return Err(ApiError::Configuration {
                    message: format!("unknown state `{other}` (expected open, closed, or all)"),
                });
            }
        };
        Ok(PullRequestRequest {
            state,
            ..PullRequestRequest::default()
        })
    }

    /// Operation to run.
    ///
    /// Without an explicit `operation`, a configured pull request number (or
    /// pull request URL) selects [`Operation::Get`] and anything else
    /// [`Operation::List`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] for an unknown operation name.
    pub fn operation(&self) -> Result<Operation, ApiError> {
        if let Some(name) = self.operation.as_deref() {
            return name.parse();
        }
        if self.pull_request_number().is_ok() {
            Ok(Operation::Get)
        } else {
            Ok(Operation::List)
        }
    }
}

/// Repository, API base, and optional number parsed from `pr_url`.
struct UrlTarget {
    api_base: String,
    repository: RepositoryRef,
    number: Option<PullRequestNumber>,
}

fn trimmed_base(api_base: &url::Url) -> String {
    api_base.as_str().trim_end_matches('/').to_owned()
}

fn parse_target(url: &str) -> Result<UrlTarget, ApiError> {
    if let Ok(locator) = PullRequestLocator::parse(url) {
        return Ok(UrlTarget {
            api_base: trimmed_base(locator.api_base()),
            repository: locator.repository().clone(),
            number: Some(locator.number()),
        });
    }
    let locator = RepositoryLocator::parse(url)?;
    Ok(UrlTarget {
        api_base: trimmed_base(locator.api_base()),
        repository: locator.repository().clone(),
        number: None,
    })
}

#[cfg(test)]
mod tests;
