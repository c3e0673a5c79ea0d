// All LLM prompt constants for the Ticket module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{JSON_ONLY_RULE, TAG_RULES};
use crate::llm_client::ModelProfile;

/// Model settings for ticket extraction.
pub const TICKET_PROFILE: ModelProfile = ModelProfile {
    model: "gpt-4",
    temperature: 0.7,
    max_tokens: None,
};

/// Model settings for tag inference. Small and cold: tags only, no prose.
pub const TAG_INFERENCE_PROFILE: ModelProfile = ModelProfile {
    model: "gpt-4o-mini",
    temperature: 0.3,
    max_tokens: Some(150),
};

const TICKET_SYSTEM_HEADER: &str = "\
You are a helpful assistant that takes user issues and creates a JSON representation of a ticket.
Required keys: title, description, tags
Rules:
";

const TAG_INFERENCE_SYSTEM_HEADER: &str = "\
You are a tag inference system. Given a ticket description, extract 1-5 relevant tags.
Rules:
- focus on key themes, technologies, or categories
- be concise and specific
";

/// System instruction for ticket extraction. The user's utterance is sent
/// verbatim as the second message.
pub fn ticket_system_prompt() -> String {
    format!("{TICKET_SYSTEM_HEADER}{TAG_RULES}{JSON_ONLY_RULE}")
}

/// System instruction for tag inference. The reply must be a bare JSON array.
pub fn tag_inference_system_prompt() -> String {
    format!(
        "{TAG_INFERENCE_SYSTEM_HEADER}{TAG_RULES}- return only the tags as a JSON array of strings\n"
    )
}
