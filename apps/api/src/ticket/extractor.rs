//! Ticket Extractor: turns a free-text issue description into a `Ticket`
//! with one model call.
//!
//! Parse failures never leave this module: they become `Extraction::Fallback`.
//! Provider failures (network, auth, API status) are returned as `LlmError`.

use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::{CompletionProvider, LlmError};
use crate::ticket::models::Ticket;
use crate::ticket::prompts::{ticket_system_prompt, TICKET_PROFILE};

pub const FALLBACK_TITLE: &str = "Untitled";

/// Tags carried by every fallback ticket.
pub const FALLBACK_TAGS: &[&str] = &[];

/// Outcome of an extraction attempt that reached the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The model's output decoded as a ticket object.
    Parsed(Ticket),
    /// The model's output could not be decoded; `ticket` is the fallback record.
    Fallback { ticket: Ticket, reason: String },
}

impl Extraction {
    pub fn ticket(&self) -> &Ticket {
        match self {
            Extraction::Parsed(ticket) => ticket,
            Extraction::Fallback { ticket, .. } => ticket,
        }
    }

    pub fn into_ticket(self) -> Ticket {
        match self {
            Extraction::Parsed(ticket) => ticket,
            Extraction::Fallback { ticket, .. } => ticket,
        }
    }

    /// `"parsed"` or `"fallback"`, for logs and telemetry metadata.
    pub fn outcome(&self) -> &'static str {
        match self {
            Extraction::Parsed(_) => "parsed",
            Extraction::Fallback { .. } => "fallback",
        }
    }
}

/// The deterministic substitute used when the model output is unusable.
pub fn fallback_ticket(user_utterance: &str) -> Ticket {
    Ticket {
        title: FALLBACK_TITLE.to_string(),
        description: user_utterance.to_string(),
        tags: FALLBACK_TAGS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Asks the model for a ticket describing `user_utterance`.
pub async fn extract_ticket(
    user_utterance: &str,
    llm: &dyn CompletionProvider,
) -> Result<Extraction, LlmError> {
    let system = ticket_system_prompt();
    let raw = llm.complete(&system, user_utterance, &TICKET_PROFILE).await?;
    debug!("Raw model output: {raw}");
    Ok(parse_ticket_output(&raw, user_utterance))
}

/// Decodes trimmed model output as a ticket object, falling back on any decode error.
pub fn parse_ticket_output(raw: &str, user_utterance: &str) -> Extraction {
    match decode_ticket(raw.trim()) {
        Ok(ticket) => Extraction::Parsed(ticket),
        Err(reason) => {
            warn!("Error parsing LLM response, using fallback ticket: {reason}");
            Extraction::Fallback {
                ticket: fallback_ticket(user_utterance),
                reason,
            }
        }
    }
}

// Serde decodes arrays into structs positionally; only objects count as tickets.
fn decode_ticket(text: &str) -> Result<Ticket, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::ModelProfile;

    /// Provider that replays a fixed reply (or a fixed API failure).
    pub(crate) struct ScriptedProvider {
        pub reply: Result<String, (u16, String)>,
    }

    impl ScriptedProvider {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
            }
        }

        pub(crate) fn failing(status: u16, message: &str) -> Self {
            Self {
                reply: Err((status, message.to_string())),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _profile: &ModelProfile,
        ) -> Result<String, LlmError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err((status, message)) => Err(LlmError::Api {
                    status: *status,
                    message: message.clone(),
                }),
            }
        }
    }

    #[test]
    fn test_well_formed_output_is_parsed_verbatim() {
        let raw = r#"
            {"title": "Cannot reset password", "description": "Reset email never arrives", "tags": ["auth", "email-delivery"]}
        "#;
        let extraction = parse_ticket_output(raw, "reset email missing");
        assert_eq!(
            extraction,
            Extraction::Parsed(Ticket {
                title: "Cannot reset password".to_string(),
                description: "Reset email never arrives".to_string(),
                tags: vec!["auth".to_string(), "email-delivery".to_string()],
            })
        );
        assert_eq!(extraction.outcome(), "parsed");
    }

    #[test]
    fn test_prose_output_falls_back_to_input() {
        let extraction = parse_ticket_output("Sure! Here is your ticket:", "dashboard is slow");
        match extraction {
            Extraction::Fallback { ticket, reason } => {
                assert_eq!(ticket.title, "Untitled");
                assert_eq!(ticket.description, "dashboard is slow");
                assert!(ticket.tags.is_empty());
                assert!(!reason.is_empty());
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_output_is_not_accepted() {
        let raw = "```json\n{\"title\": \"t\", \"description\": \"d\", \"tags\": [\"x\"]}\n```";
        let extraction = parse_ticket_output(raw, "input");
        assert_eq!(extraction.outcome(), "fallback");
    }

    #[test]
    fn test_non_object_json_falls_back() {
        let extraction = parse_ticket_output(r#"["auth", "login"]"#, "input");
        assert_eq!(extraction.into_ticket(), fallback_ticket("input"));
    }

    #[test]
    fn test_wrongly_typed_field_falls_back() {
        let extraction = parse_ticket_output(r#"{"title": 7, "description": "d", "tags": []}"#, "x");
        assert_eq!(extraction.outcome(), "fallback");
    }

    #[test]
    fn test_missing_keys_still_parse() {
        let extraction = parse_ticket_output(r#"{"title": "Only a title"}"#, "x");
        assert_eq!(
            extraction,
            Extraction::Parsed(Ticket {
                title: "Only a title".to_string(),
                ..Ticket::default()
            })
        );
    }

    #[test]
    fn test_empty_output_falls_back() {
        let extraction = parse_ticket_output("   ", "");
        assert_eq!(extraction.ticket(), &fallback_ticket(""));
    }

    #[tokio::test]
    async fn test_extract_ticket_returns_parsed_ticket() {
        let provider = ScriptedProvider::replying(
            r#"{"title": "T", "description": "D", "tags": ["one"]}"#,
        );
        let extraction = extract_ticket("anything", &provider).await.unwrap();
        assert_eq!(extraction.ticket().tags, vec!["one".to_string()]);
    }

    #[tokio::test]
    async fn test_extract_ticket_propagates_provider_failure() {
        let provider = ScriptedProvider::failing(500, "boom");
        let err = extract_ticket("anything", &provider).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (status 500): boom");
    }
}
