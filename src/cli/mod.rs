//! Runs the configured pull request operation and writes its results.
//!
//! Without `--stream` each operation goes through [`PullRequestsClient`] and
//! prints once the whole result has arrived. With `--stream` the same
//! operation goes through the stream-based client and each item is printed
//! as soon as its page lands.

use std::io::Write;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::BoxStream;
use pullwright::github::{Connection, ObservablePullRequestsClient};
use pullwright::{
    ApiError, Operation, PullRequestNumber, PullRequestsClient, PullwrightConfig, RepositoryRef,
};

pub mod output;

#[cfg(test)]
pub mod test_utils;


/// Runs the operation selected by `config` and writes one line per result.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when the repository, number, or
/// operation cannot be resolved, the first API error raised by the client,
/// or [`ApiError::Io`] if writing fails.
pub async fn run<W: Write>(
    config: &PullwrightConfig,
    connection: Arc<dyn Connection>,
    writer: &mut W,
) -> Result<(), ApiError> {
    let operation = config.operation()?;
    let target = Target {
        repository: config.repository_ref()?,
        number: operation
            .needs_number()
            .then(|| config.pull_request_number())
            .transpose()?,
    };
    tracing::debug!(
        %operation,
        repository = %target.repository,
        number = target.number.map(PullRequestNumber::get),
        stream = config.stream,
        "running operation"
    );

    let client = PullRequestsClient::new(connection);
    if config.stream {
        run_streaming(config, operation, &target, &client.observable(), writer).await
    } else {
        run_collected(config, operation, &target, &client, writer).await
    }
}

/// Repository and, for single pull request operations, the number.
struct Target {
    repository: RepositoryRef,
    number: Option<PullRequestNumber>,
}

impl Target {
    fn number(&self) -> Result<PullRequestNumber, ApiError> {
        self.number.ok_or_else(|| ApiError::Configuration {
            message: "operation needs a pull request number".to_owned(),
        })
    }
}

async fn run_collected<W: Write>(
    config: &PullwrightConfig,
    operation: Operation,
    target: &Target,
    client: &PullRequestsClient,
    writer: &mut W,
) -> Result<(), ApiError> {
    match operation {
        Operation::Get => {
            let pr = client.get(&target.repository, target.number()?).await?;
            output::write_pull_request(writer, &pr)
        }
        Operation::List => {
            let pull_requests = client
                .get_all_for_repository_with_request_and_options(
                    &target.repository,
                    &config.pull_request_request()?,
                    config.api_options()?,
                )
                .await?;
            for pr in &pull_requests {
                output::write_pull_request(writer, pr)?;
            }
            Ok(())
        }
        Operation::Merged => {
            let number = target.number()?;
            let merged = client.merged(&target.repository, number).await?;
            output::write_merged(writer, number.get(), merged)
        }
        Operation::Commits => {
            let commits = client
                .commits(&target.repository, target.number()?)
                .await?;
            for commit in &commits {
                output::write_commit(writer, commit)?;
            }
            Ok(())
        }
        Operation::Files => {
            let files = client
                .files(&target.repository, target.number()?)
                .await?;
            for file in &files {
                output::write_file(writer, file)?;
            }
            Ok(())
        }
        Operation::Comments => {
            let comments = client
                .comment()
                .get_all_with_options(
                    &target.repository,
                    target.number()?,
                    config.api_options()?,
                )
                .await?;
            for comment in &comments {
                output::write_comment(writer, comment)?;
            }
            Ok(())
        }
    }
}

async fn run_streaming<W: Write>(
    config: &PullwrightConfig,
    operation: Operation,
    target: &Target,
    client: &ObservablePullRequestsClient,
    writer: &mut W,
) -> Result<(), ApiError> {
    match operation {
        Operation::Get => {
            let stream = client.get(&target.repository, target.number()?);
            drain(stream, writer, output::write_pull_request).await
        }
        Operation::List => {
            let stream = client.get_all_for_repository_with_request_and_options(
                &target.repository,
                &config.pull_request_request()?,
                config.api_options()?,
            );
            drain(stream, writer, output::write_pull_request).await
        }
        Operation::Merged => {
            let number = target.number()?;
            let stream = client.merged(&target.repository, number);
            drain(stream, writer, |out, merged| {
                output::write_merged(out, number.get(), *merged)
            })
            .await
        }
        Operation::Commits => {
            let stream = client.commits(&target.repository, target.number()?);
            drain(stream, writer, output::write_commit).await
        }
        Operation::Files => {
            let stream = client.files(&target.repository, target.number()?);
            drain(stream, writer, output::write_file).await
        }
        Operation::Comments => {
            let stream = client.comment().get_all_with_options(
                &target.repository,
                target.number()?,
                config.api_options()?,
            );
            drain(stream, writer, output::write_comment).await
        }
    }
}

/// Writes each streamed item as it arrives, stopping at the first error.
async fn drain<T, W, F>(
    mut stream: BoxStream<'static, Result<T, ApiError>>,
    writer: &mut W,
    mut write: F,
) -> Result<(), ApiError>
where
    W: Write,
    F: FnMut(&mut W, &T) -> Result<(), ApiError>,
{
    while let Some(item) = stream.next().await {
        write(writer, &item?)?;
        writer.flush().map_err(|e| output::io_error(&e))?;
    }
    Ok(())
}
