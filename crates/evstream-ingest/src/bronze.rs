use crate::error::{Error, Result};
use crate::reader::{format_timestamp, read_raw_events, EVENT_TIME_COL, EVENT_TYPE_COL, USER_COL};
use crate::tables::extra_columns;
use chrono::NaiveDate;
use evstream_types::Event;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Column added during partitioning so the event date survives downstream.
pub const EVENT_DATE_COL: &str = "event_date";

/// One bronze partition file written by `partition_to_bronze`.
#[derive(Debug, Clone)]
pub struct BronzePartition {
    pub date: NaiveDate,
    pub rows: usize,
    pub path: PathBuf,
}

/// Split a raw events file into per-date bronze partitions.
///
/// Events are sorted by timestamp, stamped with an `event_date` column, and
/// written as `events_<YYYY-MM-DD>.csv` under `bronze_dir`, one file per
/// calendar date. All input columns are preserved.
pub fn partition_to_bronze(raw_path: &Path, bronze_dir: &Path) -> Result<Vec<BronzePartition>> {
    let mut events = read_raw_events(raw_path)?;
    events.sort_by_key(|e| e.timestamp);

    for event in &mut events {
        let date = event.timestamp.date_naive().to_string();
        event.extra.insert(EVENT_DATE_COL.to_string(), date);
    }

    let columns = extra_columns(events.iter());

    let mut by_date: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for event in events {
        by_date
            .entry(event.timestamp.date_naive())
            .or_default()
            .push(event);
    }

    fs::create_dir_all(bronze_dir)?;

    let mut partitions = Vec::with_capacity(by_date.len());
    for (date, group) in by_date {
        let path = bronze_dir.join(format!("events_{}.csv", date));
        write_bronze_file(&path, &group, &columns)?;
        partitions.push(BronzePartition {
            date,
            rows: group.len(),
            path,
        });
    }
    Ok(partitions)
}

fn write_bronze_file(path: &Path, events: &[Event], extra_cols: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![EVENT_TIME_COL, USER_COL, EVENT_TYPE_COL];
    header.extend(extra_cols.iter().map(String::as_str));
    writer.write_record(&header)?;

    for event in events {
        let mut record = vec![
            format_timestamp(event.timestamp),
            event.user_id.clone(),
            event.event_type.clone(),
        ];
        for col in extra_cols {
            record.push(event.extra.get(col).cloned().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Load every bronze partition back into one batch.
///
/// Partitions are read in sorted filename order, so a rerun sees the same
/// event order. Zero partition files is a fatal precondition failure.
pub fn load_bronze_events(bronze_dir: &Path) -> Result<Vec<Event>> {
    if !bronze_dir.is_dir() {
        return Err(Error::NoBronzeFiles(bronze_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(bronze_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type().is_file() && name.starts_with("events_") && name.ends_with(".csv") {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoBronzeFiles(bronze_dir.to_path_buf()));
    }

    let mut events = Vec::new();
    for path in paths {
        events.extend(read_raw_events(&path)?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partition_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("events_raw.csv");
        let mut file = std::fs::File::create(&raw).unwrap();
        file.write_all(
            b"event_time,user_id,event_type\n\
              2024-03-02 10:00:00,u2,cart\n\
              2024-03-01 09:00:00,u1,view\n\
              2024-03-01 09:30:00,u1,view\n",
        )
        .unwrap();

        let bronze = dir.path().join("bronze");
        let partitions = partition_to_bronze(&raw, &bronze).unwrap();

        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].rows, 2);
        assert_eq!(partitions[1].rows, 1);
        assert!(bronze.join("events_2024-03-01.csv").exists());
        assert!(bronze.join("events_2024-03-02.csv").exists());

        let loaded = load_bronze_events(&bronze).unwrap();
        assert_eq!(loaded.len(), 3);
        // load order follows partition filenames, each sorted by time
        assert_eq!(loaded[0].user_id, "u1");
        assert_eq!(
            loaded[0].extra.get(EVENT_DATE_COL).map(String::as_str),
            Some("2024-03-01")
        );
        assert_eq!(loaded[2].user_id, "u2");
    }

    #[test]
    fn test_empty_bronze_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_bronze_events(dir.path()),
            Err(Error::NoBronzeFiles(_))
        ));
    }
}
