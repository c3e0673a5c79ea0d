//! Axum route handlers for the Ticket Agent API.

use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::state::AppState;
use crate::telemetry::Telemetry;
use crate::ticket::extractor::{extract_ticket, Extraction};
use crate::ticket::metrics::{bool_score, compute_metrics, tag_count_score, FieldValidation};
use crate::ticket::models::{
    TagInferenceRequest, TagInferenceResponse, TicketMetrics, TicketRequest, TicketResponse,
};
use crate::ticket::tag_inference::infer_tags;

const TICKET_TRACE: &str = "ticket_creation";
const TICKET_ERROR_TRACE: &str = "ticket_creation_error";
const GENERATION_SPAN: &str = "llm_generation";

/// POST /api/agent/create-ticket
///
/// Extracts a ticket from free text. Unparseable model output still yields a
/// 200 with the fallback ticket; only provider or internal failures yield a 500.
/// A body that does not decode is rejected before any telemetry is recorded.
pub async fn handle_create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    info!("Starting ticket creation process...");
    debug!("Request data: {request:?}");

    let start = Instant::now();
    match create_ticket(&state, &request, start).await {
        Ok(response) => {
            info!("Ticket creation successful");
            debug!("Sending response: {response:?}");
            Json(response).into_response()
        }
        Err(e) => {
            error!("Error in ticket creation: {e}");
            record_failure(&state.telemetry, &request, &e, start.elapsed());
            e.into_response()
        }
    }
}

async fn create_ticket(
    state: &AppState,
    request: &TicketRequest,
    start: Instant,
) -> Result<TicketResponse, AppError> {
    debug!("Calling LLM for ticket creation...");
    let extraction = extract_ticket(&request.user_utterance, state.llm.as_ref()).await?;

    let elapsed = start.elapsed();
    debug!(
        "LLM processing completed in {:.2}s ({})",
        elapsed.as_secs_f64(),
        extraction.outcome()
    );

    let metrics = compute_metrics(extraction.ticket(), elapsed);
    record_success(&state.telemetry, request, &extraction, &metrics)?;

    Ok(TicketResponse::new(extraction.into_ticket(), metrics))
}

fn record_success(
    telemetry: &Telemetry,
    request: &TicketRequest,
    extraction: &Extraction,
    metrics: &TicketMetrics,
) -> Result<(), AppError> {
    let ticket = extraction.ticket();
    let output = serde_json::to_value(ticket).map_err(anyhow::Error::from)?;
    let mut metadata = json!({
        "organization_id": request.organization_id,
        "metrics": serde_json::to_value(metrics).map_err(anyhow::Error::from)?,
        "field_validation": serde_json::to_value(FieldValidation::of(ticket))
            .map_err(anyhow::Error::from)?,
        "extraction": extraction.outcome(),
    });
    if let Extraction::Fallback { reason, .. } = extraction {
        metadata["fallback_reason"] = Value::String(reason.clone());
    }

    let input = Value::String(request.user_utterance.clone());
    let mut trace = telemetry.begin_trace(TICKET_TRACE, input.clone(), metadata);
    trace.attach_span(GENERATION_SPAN, input, output);

    trace.record_score(
        "processing_time",
        metrics.processing_time,
        "Time taken to process request in seconds",
    );
    let tag_score = tag_count_score(metrics.tag_count);
    trace.record_score(
        "tag_count_valid",
        tag_score,
        format!(
            "Tag count {} {} valid range",
            metrics.tag_count,
            if tag_score == 1.0 { "within" } else { "outside" }
        ),
    );
    trace.record_score(
        "required_fields_present",
        bool_score(metrics.has_required_fields),
        "All required fields present in ticket",
    );
    trace.record_score("success_rate", 1.0, "Successfully created ticket");

    telemetry.end(trace);
    Ok(())
}

fn record_failure(
    telemetry: &Telemetry,
    request: &TicketRequest,
    err: &AppError,
    elapsed: Duration,
) {
    let processing_time = elapsed.as_secs_f64();
    let message = err.to_string();
    let metadata = json!({
        "organization_id": request.organization_id,
        "metrics": {
            "error_type": err.error_type(),
            "processing_time": processing_time,
        },
    });

    let input = Value::String(request.user_utterance.clone());
    let mut trace = telemetry.begin_trace(TICKET_ERROR_TRACE, input.clone(), metadata);
    trace.attach_span(GENERATION_SPAN, input, json!({ "error": message }));
    trace.record_score(
        "processing_time",
        processing_time,
        "Time taken to process request in seconds",
    );
    trace.record_score("success_rate", 0.0, format!("Failed with error: {message}"));

    telemetry.end(trace);
}

/// POST /api/agent/infer-tags
///
/// Suggests tags for an existing ticket description.
pub async fn handle_infer_tags(
    State(state): State<AppState>,
    payload: Result<Json<TagInferenceRequest>, JsonRejection>,
) -> Result<Json<TagInferenceResponse>, AppError> {
    let Json(request) = payload?;
    let tags = infer_tags(&request.description, state.llm.as_ref()).await?;
    debug!("Inferred tags: {tags:?}");
    Ok(Json(TagInferenceResponse { tags }))
}
