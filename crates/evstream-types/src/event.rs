use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical event type labels produced by normalization.
///
/// Labels outside this set are legal and flow through the pipeline
/// unchanged; these three get dedicated funnel columns.
pub const VIEW: &str = "view";
pub const CART: &str = "cart";
pub const PURCHASE: &str = "purchase";

/// A single user action record.
///
/// One event per raw row. `extra` carries any input columns beyond the
/// required three, verbatim, so they survive into the silver output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event timestamp (UTC); ordering key within a user
    pub timestamp: DateTime<Utc>,

    /// Owning user
    pub user_id: String,

    /// Action label; canonical after normalization
    pub event_type: String,

    /// Passthrough columns, keyed by input header name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// An event with its assigned session.
///
/// `session_id` is a pure function of (user_id, ordered timestamps, gap
/// threshold): re-deriving from the same inputs yields the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// `"{user_id}-{session_index}"`
    pub session_id: String,

    /// 1-based per-user session counter
    pub session_index: u32,

    #[serde(flatten)]
    pub event: Event,
}

impl SessionEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.event.timestamp
    }

    pub fn user_id(&self) -> &str {
        &self.event.user_id
    }

    pub fn event_type(&self) -> &str {
        &self.event.event_type
    }
}
