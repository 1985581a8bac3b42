use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row per session: the silver `sessions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub user_id: String,
    pub session_start: DateTime<Utc>,
    pub session_end: DateTime<Utc>,
    pub events_count: u64,
    /// Distinct canonical event types among member events
    pub unique_event_types: u64,
    /// (session_end - session_start) in minutes; always >= 0
    pub session_length_minutes: f64,
}

/// One row per minute bucket: the gold `events_by_minute` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteCount {
    /// Minute bucket start (seconds and below truncated)
    pub minute: DateTime<Utc>,
    pub events_count: u64,
}

/// One row per canonical event type: the gold `events_by_type` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    pub event_type: String,
    pub events_count: u64,
}

/// Per-user pivot of event counts by canonical type: the gold
/// `user_funnel` table.
///
/// Columns are dataset-dependent (one per type seen), so the table carries
/// its own header. `columns` holds display names (`views`, `carts`,
/// `purchases`, other types verbatim); each row's `counts` aligns with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFunnel {
    pub columns: Vec<String>,
    pub rows: Vec<FunnelRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelRow {
    pub user_id: String,
    pub counts: Vec<u64>,
}

impl UserFunnel {
    /// Count for a display column in a row, 0 if the column is absent.
    pub fn count(&self, row: &FunnelRow, column: &str) -> u64 {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| row.counts.get(i).copied())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funnel_count_lookup() {
        let funnel = UserFunnel {
            columns: vec!["carts".to_string(), "views".to_string()],
            rows: vec![FunnelRow {
                user_id: "u1".to_string(),
                counts: vec![1, 3],
            }],
        };

        assert_eq!(funnel.count(&funnel.rows[0], "views"), 3);
        assert_eq!(funnel.count(&funnel.rows[0], "carts"), 1);
        assert_eq!(funnel.count(&funnel.rows[0], "purchases"), 0);
    }
}
