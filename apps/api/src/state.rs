use std::sync::Arc;

use crate::llm_client::CompletionProvider;
use crate::telemetry::Telemetry;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; credentials live inside the clients.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation backend. Default: `LlmClient` against OpenAI.
    pub llm: Arc<dyn CompletionProvider>,
    /// Langfuse handle; disabled when the client could not be built at startup.
    pub telemetry: Telemetry,
}
