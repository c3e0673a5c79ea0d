//! Telemetry: traces, spans and scores describing each request's outcome.
//!
//! Usage: `begin_trace` → `Trace::attach_span` / `Trace::record_score` → `Telemetry::end`.
//! Nothing leaves the process until `end`, which hands the whole trace to a
//! background task as one ingestion batch. Sink failures are logged and
//! swallowed there: telemetry never delays or changes what the caller sees.
//!
//! `Telemetry` holds an optional `Arc<dyn TelemetrySink>`; when the sink could not
//! be built at startup every call becomes a logged no-op.

pub mod langfuse;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ingestion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Ingestion rejected {rejected} of {total} events")]
    Rejected { rejected: usize, total: usize },

    #[error("Invalid telemetry configuration: {0}")]
    Config(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Ingestion wire format
// ────────────────────────────────────────────────────────────────────────────

/// One entry of an ingestion batch.
#[derive(Debug, Clone, Serialize)]
pub struct IngestionEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "body", rename_all = "kebab-case")]
pub enum EventPayload {
    TraceCreate(TraceBody),
    SpanCreate(SpanBody),
    ScoreCreate(ScoreBody),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceBody {
    pub id: Uuid,
    pub name: String,
    pub input: Value,
    pub metadata: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanBody {
    pub id: Uuid,
    pub trace_id: Uuid,
    pub name: String,
    pub input: Value,
    pub output: Value,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBody {
    pub id: Uuid,
    pub trace_id: Uuid,
    pub name: String,
    pub value: f64,
    pub comment: String,
}

impl IngestionEvent {
    fn now(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sink trait
// ────────────────────────────────────────────────────────────────────────────

/// Destination for finished traces. Implement this to swap backends without
/// touching handler code.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn ingest(&self, batch: Vec<IngestionEvent>) -> Result<(), TelemetryError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Trace builder
// ────────────────────────────────────────────────────────────────────────────

/// An open trace. Collects spans and scores until handed to `Telemetry::end`.
#[derive(Debug, Clone)]
pub struct Trace {
    id: Uuid,
    name: String,
    events: Vec<IngestionEvent>,
}

impl Trace {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn attach_span(&mut self, name: &str, input: Value, output: Value) {
        let now = Utc::now();
        self.events
            .push(IngestionEvent::now(EventPayload::SpanCreate(SpanBody {
                id: Uuid::new_v4(),
                trace_id: self.id,
                name: name.to_string(),
                input,
                output,
                start_time: now,
                end_time: now,
            })));
    }

    pub fn record_score(&mut self, name: &str, value: f64, comment: impl Into<String>) {
        self.events
            .push(IngestionEvent::now(EventPayload::ScoreCreate(ScoreBody {
                id: Uuid::new_v4(),
                trace_id: self.id,
                name: name.to_string(),
                value,
                comment: comment.into(),
            })));
    }

    pub fn into_events(self) -> Vec<IngestionEvent> {
        self.events
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Process-wide handle
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Telemetry {
    sink: Option<Arc<dyn TelemetrySink>>,
}

impl Telemetry {
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// A handle whose every call is a no-op with a local warning.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn begin_trace(&self, name: &str, input: Value, metadata: Value) -> Trace {
        let id = Uuid::new_v4();
        let trace_event = IngestionEvent::now(EventPayload::TraceCreate(TraceBody {
            id,
            name: name.to_string(),
            input,
            metadata,
            timestamp: Utc::now(),
        }));
        Trace {
            id,
            name: name.to_string(),
            events: vec![trace_event],
        }
    }

    /// Ships the trace on a spawned task and returns immediately.
    /// Must be called from within a Tokio runtime.
    pub fn end(&self, trace: Trace) {
        let Some(sink) = &self.sink else {
            warn!("Telemetry client not initialized, skipping trace '{}'", trace.name);
            return;
        };

        let sink = Arc::clone(sink);
        let name = trace.name.clone();
        let trace_id = trace.id();
        let batch = trace.into_events();
        debug!("Sending trace '{name}' {trace_id} ({} events)", batch.len());

        tokio::spawn(async move {
            match sink.ingest(batch).await {
                Ok(()) => debug!("Trace '{name}' recorded"),
                Err(e) => error!("Error sending trace '{name}' to telemetry: {e}"),
            }
        });
    }
}
