use crate::error::{Error, Result};
use crate::reader::{format_timestamp, parse_timestamp, EVENT_TIME_COL, EVENT_TYPE_COL, USER_COL};
use evstream_types::{
    Event, MinuteCount, SessionEvent, SessionSummary, TypeCount, UserFunnel,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

const SESSION_ID_COL: &str = "session_id";
const SESSION_INDEX_COL: &str = "session_index";

/// Union of passthrough column names across a batch, sorted.
pub(crate) fn extra_columns<'a>(events: impl Iterator<Item = &'a Event>) -> Vec<String> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for event in events {
        names.extend(event.extra.keys().map(String::as_str));
    }
    names.into_iter().map(String::from).collect()
}

/// Write the sessionized event set as `events_silver.csv`.
///
/// Columns: the three required ones, passthrough columns in sorted order,
/// then `session_index` and `session_id`.
pub fn write_silver_events(path: &Path, events: &[SessionEvent]) -> Result<()> {
    let extra_cols = extra_columns(events.iter().map(|e| &e.event));

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![EVENT_TIME_COL, USER_COL, EVENT_TYPE_COL];
    header.extend(extra_cols.iter().map(String::as_str));
    header.push(SESSION_INDEX_COL);
    header.push(SESSION_ID_COL);
    writer.write_record(&header)?;

    for event in events {
        let mut record = vec![
            format_timestamp(event.timestamp()),
            event.user_id().to_string(),
            event.event_type().to_string(),
        ];
        for col in &extra_cols {
            record.push(event.event.extra.get(col).cloned().unwrap_or_default());
        }
        record.push(event.session_index.to_string());
        record.push(event.session_id.clone());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read `events_silver.csv` back into sessionized events for the gold stage.
pub fn read_silver_events(path: &Path) -> Result<Vec<SessionEvent>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };
    let time_idx = position(EVENT_TIME_COL)?;
    let user_idx = position(USER_COL)?;
    let type_idx = position(EVENT_TYPE_COL)?;
    let index_idx = position(SESSION_INDEX_COL)?;
    let id_idx = position(SESSION_ID_COL)?;
    let fixed = [time_idx, user_idx, type_idx, index_idx, id_idx];

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| Error::Parse(format!("row is missing the '{}' field", name)))
        };

        let timestamp = parse_timestamp(cell(time_idx, EVENT_TIME_COL)?)?;
        let session_index: u32 = cell(index_idx, SESSION_INDEX_COL)?.parse().map_err(|_| {
            Error::Parse(format!(
                "invalid session_index '{}'",
                record.get(index_idx).unwrap_or_default()
            ))
        })?;

        let mut extra = BTreeMap::new();
        for (idx, name) in headers.iter().enumerate() {
            if !fixed.contains(&idx) {
                if let Some(value) = record.get(idx) {
                    extra.insert(name.to_string(), value.to_string());
                }
            }
        }

        events.push(SessionEvent {
            session_id: cell(id_idx, SESSION_ID_COL)?.to_string(),
            session_index,
            event: Event {
                timestamp,
                user_id: cell(user_idx, USER_COL)?.to_string(),
                event_type: cell(type_idx, EVENT_TYPE_COL)?.to_string(),
                extra,
            },
        });
    }
    Ok(events)
}

/// Write the sessions table (`sessions.csv`).
pub fn write_sessions(path: &Path, sessions: &[SessionSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "session_id",
        "user_id",
        "session_start",
        "session_end",
        "events_count",
        "unique_event_types",
        "session_length_minutes",
    ])?;

    for session in sessions {
        writer.write_record([
            session.session_id.as_str(),
            session.user_id.as_str(),
            &format_timestamp(session.session_start),
            &format_timestamp(session.session_end),
            &session.events_count.to_string(),
            &session.unique_event_types.to_string(),
            &session.session_length_minutes.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the per-minute counts table (`events_by_minute.csv`).
pub fn write_minute_counts(path: &Path, counts: &[MinuteCount]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["minute", "events_count"])?;
    for count in counts {
        writer.write_record([
            format_timestamp(count.minute),
            count.events_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-type counts table (`events_by_type.csv`).
pub fn write_type_counts(path: &Path, counts: &[TypeCount]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["event_type", "events_count"])?;
    for count in counts {
        writer.write_record([count.event_type.as_str(), &count.events_count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-user funnel pivot (`user_funnel.csv`).
pub fn write_user_funnel(path: &Path, funnel: &UserFunnel) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["user_id"];
    header.extend(funnel.columns.iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in &funnel.rows {
        let mut record = vec![row.user_id.clone()];
        record.extend(row.counts.iter().map(|c| c.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use evstream_types::FunnelRow;

    fn session_event(user_id: &str, minute: u32, event_type: &str, index: u32) -> SessionEvent {
        SessionEvent {
            session_id: format!("{}-{}", user_id, index),
            session_index: index,
            event: Event {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap(),
                user_id: user_id.to_string(),
                event_type: event_type.to_string(),
                extra: BTreeMap::from([("device".to_string(), "mobile".to_string())]),
            },
        }
    }

    #[test]
    fn test_silver_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_silver.csv");
        let events = vec![
            session_event("u1", 0, "view", 1),
            session_event("u1", 10, "cart", 1),
        ];

        write_silver_events(&path, &events).unwrap();
        let loaded = read_silver_events(&path).unwrap();

        assert_eq!(loaded, events);
    }

    #[test]
    fn test_silver_header_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events_silver.csv");
        write_silver_events(&path, &[session_event("u1", 0, "view", 1)]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "event_time,user_id,event_type,device,session_index,session_id"
        );
    }

    #[test]
    fn test_funnel_written_with_dynamic_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_funnel.csv");
        let funnel = UserFunnel {
            columns: vec!["carts".to_string(), "views".to_string()],
            rows: vec![FunnelRow {
                user_id: "u1".to_string(),
                counts: vec![1, 3],
            }],
        };

        write_user_funnel(&path, &funnel).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "user_id,carts,views");
        assert_eq!(lines.next().unwrap(), "u1,1,3");
    }
}
