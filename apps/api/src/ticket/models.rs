use serde::{Deserialize, Deserializer, Serialize};

/// Request body for `POST /api/agent/create-ticket`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    pub user_utterance: String,
    pub organization_id: String,
}

/// A structured ticket as produced by the model.
///
/// Missing or null keys decode as empty values; whether a ticket is complete
/// is judged afterwards by `TicketMetrics::has_required_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Per-request quality metrics returned alongside the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TicketMetrics {
    /// Seconds spent in the extraction call.
    pub processing_time: f64,
    pub has_required_fields: bool,
    pub tag_count: usize,
}

/// Success body for `POST /api/agent/create-ticket`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketResponse {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub metrics: TicketMetrics,
}

impl TicketResponse {
    pub fn new(ticket: Ticket, metrics: TicketMetrics) -> Self {
        Self {
            title: ticket.title,
            description: ticket.description,
            tags: ticket.tags,
            metrics,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagInferenceRequest {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInferenceResponse {
    pub tags: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
