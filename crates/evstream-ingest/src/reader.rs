use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use evstream_types::Event;
use std::collections::BTreeMap;
use std::path::Path;

/// Required input columns. Everything else is carried as passthrough.
pub const EVENT_TIME_COL: &str = "event_time";
pub const USER_COL: &str = "user_id";
pub const EVENT_TYPE_COL: &str = "event_type";

/// Accepted timestamp shapes, tried in order.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(Error::Parse(format!("invalid timestamp '{}'", raw)))
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

struct ColumnLayout {
    time_idx: usize,
    user_idx: usize,
    type_idx: usize,
    /// (header index, column name) for every passthrough column
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };

        let time_idx = position(EVENT_TIME_COL)?;
        let user_idx = position(USER_COL)?;
        let type_idx = position(EVENT_TYPE_COL)?;
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != time_idx && *i != user_idx && *i != type_idx)
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Self {
            time_idx,
            user_idx,
            type_idx,
            extra,
        })
    }

    fn field<'r>(record: &'r csv::StringRecord, idx: usize, name: &str) -> Result<&'r str> {
        record
            .get(idx)
            .ok_or_else(|| Error::Parse(format!("row is missing the '{}' field", name)))
    }

    fn event(&self, record: &csv::StringRecord) -> Result<Event> {
        let timestamp = parse_timestamp(Self::field(record, self.time_idx, EVENT_TIME_COL)?)?;
        let user_id = Self::field(record, self.user_idx, USER_COL)?.to_string();
        let event_type = Self::field(record, self.type_idx, EVENT_TYPE_COL)?.to_string();

        let mut extra = BTreeMap::new();
        for (idx, name) in &self.extra {
            if let Some(value) = record.get(*idx) {
                extra.insert(name.clone(), value.to_string());
            }
        }

        Ok(Event {
            timestamp,
            user_id,
            event_type,
            extra,
        })
    }
}

/// Read a raw events CSV into memory.
///
/// The header must carry `event_time`, `user_id`, and `event_type`; a
/// missing column or an unparseable timestamp aborts the read with no
/// partial output. Remaining columns land in `Event::extra` verbatim.
pub fn read_raw_events(path: &Path) -> Result<Vec<Event>> {
    let mut reader = csv::Reader::from_path(path)?;
    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut events = Vec::new();
    for record in reader.records() {
        events.push(layout.event(&record?)?);
    }
    Ok(events)
}
