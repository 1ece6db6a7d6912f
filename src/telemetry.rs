//! Structured request telemetry.
//!
//! Pullwright has no metrics pipeline. The HTTP connection reports each
//! completed request and each rate limit rejection to a [`TelemetrySink`],
//! which by default discards them.

use std::io::{self, Write};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// An operational event observed by the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A request reached GitHub and produced a response.
    RequestCompleted {
        /// HTTP verb (e.g. `GET`).
        method: String,
        /// Request path or absolute page URL.
        path: String,
        /// HTTP status code returned by GitHub.
        status: u16,
    },
    /// GitHub rejected a request because the rate limit was exhausted.
    RateLimited {
        /// Unix timestamp at which the quota resets, when known.
        reset_at: Option<u64>,
    },
}

/// Destination for [`TelemetryEvent`]s.
pub trait TelemetrySink: Send + Sync {
    /// Handles one event. Failures are swallowed.
    fn record(&self, event: TelemetryEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Writes each event as one line of JSON.
#[derive(Debug)]
pub struct JsonlTelemetrySink<W> {
    writer: Mutex<W>,
}

/// JSON lines sink bound to stderr, enabled with `--telemetry`.
pub type StderrJsonlTelemetrySink = JsonlTelemetrySink<io::Stderr>;

impl<W: Write + Send> JsonlTelemetrySink<W> {
    /// Creates a sink that appends to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the writer, e.g. to inspect captured output.
    #[must_use]
    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }
}

impl StderrJsonlTelemetrySink {
    /// Creates a sink writing to the process's stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> TelemetrySink for JsonlTelemetrySink<W> {
    fn record(&self, event: TelemetryEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if serde_json::to_writer(&mut *writer, &event).is_ok() {
            let _ignored = writer.write_all(b"\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{JsonlTelemetrySink, TelemetryEvent, TelemetrySink};

    #[test]
    fn jsonl_sink_writes_one_tagged_line_per_event() {
        let sink = JsonlTelemetrySink::new(Vec::new());
        sink.record(TelemetryEvent::RequestCompleted {
            method: "GET".to_owned(),
            path: "/repos/octo/repo/pulls/1".to_owned(),
            status: 200,
        });
        sink.record(TelemetryEvent::RateLimited { reset_at: None });

        let buffer = sink.into_inner().expect("writer should not be poisoned");
        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).expect("line should be JSON"))
            .collect();

        assert_eq!(
            lines,
            vec![
                serde_json::json!({
                    "type": "request_completed",
                    "method": "GET",
                    "path": "/repos/octo/repo/pulls/1",
                    "status": 200
                }),
                serde_json::json!({ "type": "rate_limited", "reset_at": null }),
            ]
        );
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = TelemetryEvent::RateLimited {
            reset_at: Some(1_700_000_000),
        };
        let encoded = serde_json::to_string(&event).expect("event should serialise");

        let decoded: TelemetryEvent =
            serde_json::from_str(&encoded).expect("event should deserialise");

        assert_eq!(decoded, event);
    }
}
