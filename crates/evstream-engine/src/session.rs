use chrono::{DateTime, TimeDelta, Utc};
use evstream_types::{Error, Event, Result, SessionEvent};

/// Inactivity gap above which a user's next event opens a new session.
pub const DEFAULT_SESSION_GAP_MINUTES: i64 = 30;

/// Partition each user's events into sessions.
///
/// Events are stable-sorted by (user_id, timestamp), so ties on timestamp
/// keep their input order. Within a user, an event starts a new session
/// when it is the user's first event or when the gap since the previous
/// event is strictly greater than the threshold; the comparison runs at
/// full `TimeDelta` precision, so a gap of exactly the threshold continues
/// the session. Session ids are `"{user_id}-{session_index}"` with a
/// 1-based per-user index.
///
/// Deterministic and idempotent: the same events and threshold always
/// produce the same assignment.
pub fn assign_sessions(events: Vec<Event>, gap_minutes: i64) -> Result<Vec<SessionEvent>> {
    if events.is_empty() {
        return Err(Error::EmptyInput("assign_sessions"));
    }

    let mut events = events;
    events.sort_by(|a, b| {
        a.user_id
            .cmp(&b.user_id)
            .then(a.timestamp.cmp(&b.timestamp))
    });

    let gap_threshold = TimeDelta::minutes(gap_minutes);

    // Explicit per-user fold: carry (previous timestamp, session index)
    // while walking the sorted events.
    let mut current_user: Option<String> = None;
    let mut previous_ts: Option<DateTime<Utc>> = None;
    let mut session_index: u32 = 0;

    let mut assigned = Vec::with_capacity(events.len());
    for event in events {
        if current_user.as_deref() != Some(event.user_id.as_str()) {
            current_user = Some(event.user_id.clone());
            previous_ts = None;
            session_index = 0;
        }

        let new_session = match previous_ts {
            None => true,
            Some(prev) => event.timestamp - prev > gap_threshold,
        };
        if new_session {
            session_index += 1;
        }
        previous_ts = Some(event.timestamp);

        assigned.push(SessionEvent {
            session_id: format!("{}-{}", event.user_id, session_index),
            session_index,
            event,
        });
    }

    Ok(assigned)
}
