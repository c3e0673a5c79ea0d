mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod telemetry;
mod ticket;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::telemetry::langfuse::LangfuseClient;
use crate::telemetry::Telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ticket Agent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!("LLM client initialized ({})", config.openai_base_url);

    // Initialize Langfuse; run without telemetry rather than refuse to start
    let telemetry = build_telemetry(&config);
    info!(
        "Telemetry {}",
        if telemetry.is_enabled() { "enabled" } else { "disabled" }
    );

    let state = AppState {
        llm: Arc::new(llm),
        telemetry,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_telemetry(config: &Config) -> Telemetry {
    info!("Initializing Langfuse client...");
    match LangfuseClient::new(
        &config.langfuse_host,
        config.langfuse_public_key.clone(),
        config.langfuse_secret_key.clone(),
    ) {
        Ok(client) => {
            info!("Langfuse client initialized ({})", config.langfuse_host);
            Telemetry::new(Arc::new(client))
        }
        Err(e) => {
            error!("Error initializing Langfuse, telemetry disabled: {e}");
            Telemetry::disabled()
        }
    }
}
