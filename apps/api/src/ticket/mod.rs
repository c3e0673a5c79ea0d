// Ticket Agent: free-text issue → structured ticket, plus tag inference.
// All LLM calls go through llm_client; nothing here talks to OpenAI directly.

pub mod extractor;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod prompts;
pub mod tag_inference;
