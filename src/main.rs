//! Pullwright CLI entrypoint for GitHub pull request operations.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use pullwright::github::Connection;
use pullwright::telemetry::StderrJsonlTelemetrySink;
use pullwright::{ApiError, OctocrabConnection, PullwrightConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter, e.g. `pullwright=debug`.
const LOG_FILTER_ENV: &str = "PULLWRIGHT_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report_failure(&error, &mut io::stderr().lock()),
    }
}

/// Prints `error` and returns the failure exit code.
fn report_failure<W: Write>(error: &ApiError, writer: &mut W) -> ExitCode {
    // Nothing is left to report to if the writer itself is gone.
    let _ignored = writeln!(writer, "{error}");
    ExitCode::FAILURE
}

async fn run() -> Result<(), ApiError> {
    let config = load_config()?;
    let token = config.resolve_token()?;
    let api_base = config.api_base()?;

    let mut connection = OctocrabConnection::for_token(&token, &api_base)?;
    if config.telemetry {
        connection = connection.with_telemetry(Arc::new(StderrJsonlTelemetrySink::stderr()));
    }
    let shared: Arc<dyn Connection> = Arc::new(connection);

    let mut stdout = io::stdout().lock();
    cli::run(&config, shared, &mut stdout).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<PullwrightConfig, ApiError> {
    PullwrightConfig::load().map_err(|error| ApiError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr `tracing` subscriber filtered by `PULLWRIGHT_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
