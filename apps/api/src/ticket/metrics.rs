use std::time::Duration;

use serde::Serialize;

use crate::ticket::models::{Ticket, TicketMetrics};

pub const MIN_TAGS: usize = 1;
pub const MAX_TAGS: usize = 5;

/// Per-field presence checks. A field counts as present only when non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldValidation {
    pub title: bool,
    pub description: bool,
    pub tags: bool,
}

impl FieldValidation {
    pub fn of(ticket: &Ticket) -> Self {
        Self {
            title: !ticket.title.is_empty(),
            description: !ticket.description.is_empty(),
            tags: !ticket.tags.is_empty(),
        }
    }

    pub fn all_present(&self) -> bool {
        self.title && self.description && self.tags
    }
}

pub fn compute_metrics(ticket: &Ticket, elapsed: Duration) -> TicketMetrics {
    TicketMetrics {
        processing_time: elapsed.as_secs_f64(),
        has_required_fields: FieldValidation::of(ticket).all_present(),
        tag_count: ticket.tags.len(),
    }
}

/// 1.0 when the tag count is within `MIN_TAGS..=MAX_TAGS`, else 0.0.
pub fn tag_count_score(tag_count: usize) -> f64 {
    if (MIN_TAGS..=MAX_TAGS).contains(&tag_count) {
        1.0
    } else {
        0.0
    }
}

pub fn bool_score(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}
