//! Tag Inference: suggests 1-5 tags for an existing ticket description.
//!
//! Unlike ticket extraction there is no fallback: output that is not a JSON
//! array of strings is an error.

use tracing::{debug, error};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, CompletionProvider};
use crate::ticket::prompts::{tag_inference_system_prompt, TAG_INFERENCE_PROFILE};

pub const TAG_PARSE_FAILURE: &str = "Failed to parse tags";

pub async fn infer_tags(
    description: &str,
    llm: &dyn CompletionProvider,
) -> Result<Vec<String>, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let system = tag_inference_system_prompt();
    let raw = llm
        .complete(&system, description, &TAG_INFERENCE_PROFILE)
        .await?;
    debug!("Raw tag inference output: {raw}");

    parse_tag_output(&raw)
}

/// Decodes model output as a JSON string array, tolerating markdown fences.
pub fn parse_tag_output(raw: &str) -> Result<Vec<String>, AppError> {
    let text = strip_json_fences(raw);
    let text = if text.is_empty() { "[]" } else { text };
    serde_json::from_str::<Vec<String>>(text).map_err(|e| {
        error!("Failed to parse tag inference output: {e}; output was: {raw}");
        AppError::UnparseableOutput(TAG_PARSE_FAILURE.to_string())
    })
}
