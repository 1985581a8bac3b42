use chrono::{DateTime, Utc};
use evstream_types::{Error, Result, SessionEvent, SessionSummary};
use std::collections::{btree_map::Entry, BTreeMap, HashSet};

struct SessionAccumulator<'a> {
    user_id: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    events_count: u64,
    event_types: HashSet<&'a str>,
}

impl<'a> SessionAccumulator<'a> {
    fn open(event: &'a SessionEvent) -> Self {
        let mut event_types = HashSet::new();
        event_types.insert(event.event_type());
        Self {
            user_id: event.user_id(),
            start: event.timestamp(),
            end: event.timestamp(),
            events_count: 1,
            event_types,
        }
    }

    fn fold(&mut self, event: &'a SessionEvent) {
        self.start = self.start.min(event.timestamp());
        self.end = self.end.max(event.timestamp());
        self.events_count += 1;
        self.event_types.insert(event.event_type());
    }
}

/// Reduce sessionized events into one summary row per session.
///
/// Rows come back sorted by session_id. A session holding events from more
/// than one user means the assigner (or an upstream collaborator) is
/// broken; that surfaces as `Error::SessionInvariant` rather than being
/// silently corrected.
pub fn summarize_sessions(events: &[SessionEvent]) -> Result<Vec<SessionSummary>> {
    if events.is_empty() {
        return Err(Error::EmptyInput("summarize_sessions"));
    }

    let mut sessions: BTreeMap<&str, SessionAccumulator> = BTreeMap::new();
    for event in events {
        match sessions.entry(event.session_id.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(SessionAccumulator::open(event));
            }
            Entry::Occupied(mut slot) => {
                let acc = slot.get_mut();
                if acc.user_id != event.user_id() {
                    return Err(Error::SessionInvariant {
                        session_id: event.session_id.clone(),
                        expected: acc.user_id.to_string(),
                        found: event.user_id().to_string(),
                    });
                }
                acc.fold(event);
            }
        }
    }

    Ok(sessions
        .into_iter()
        .map(|(session_id, acc)| SessionSummary {
            session_id: session_id.to_string(),
            user_id: acc.user_id.to_string(),
            session_start: acc.start,
            session_end: acc.end,
            events_count: acc.events_count,
            unique_event_types: acc.event_types.len() as u64,
            session_length_minutes: (acc.end - acc.start).num_milliseconds() as f64 / 60_000.0,
        })
        .collect())
}
