use chrono::{DateTime, TimeDelta, Timelike, Utc};
use evstream_types::{
    Error, FunnelRow, MinuteCount, Result, SessionEvent, TypeCount, UserFunnel, CART, PURCHASE,
    VIEW,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};

fn truncate_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts - TimeDelta::seconds(ts.second() as i64) - TimeDelta::nanoseconds(ts.nanosecond() as i64)
}

/// Count events per minute bucket, ascending by minute.
pub fn aggregate_by_minute(events: &[SessionEvent]) -> Result<Vec<MinuteCount>> {
    if events.is_empty() {
        return Err(Error::EmptyInput("aggregate_by_minute"));
    }

    let mut buckets: BTreeMap<DateTime<Utc>, u64> = BTreeMap::new();
    for event in events {
        *buckets.entry(truncate_to_minute(event.timestamp())).or_insert(0) += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(minute, events_count)| MinuteCount {
            minute,
            events_count,
        })
        .collect())
}

/// Count events per canonical type, descending by count.
///
/// The sort is stable: types with equal counts stay in the order their
/// label first appeared in the event stream, so reruns over the same input
/// reproduce the same row order.
pub fn aggregate_by_type(events: &[SessionEvent]) -> Result<Vec<TypeCount>> {
    if events.is_empty() {
        return Err(Error::EmptyInput("aggregate_by_type"));
    }

    let mut rows: Vec<TypeCount> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for event in events {
        match seen.get(event.event_type()) {
            Some(&i) => rows[i].events_count += 1,
            None => {
                seen.insert(event.event_type(), rows.len());
                rows.push(TypeCount {
                    event_type: event.event_type().to_string(),
                    events_count: 1,
                });
            }
        }
    }

    rows.sort_by(|a, b| b.events_count.cmp(&a.events_count));
    Ok(rows)
}

fn display_column(canonical: &str) -> String {
    match canonical {
        VIEW => "views".to_string(),
        CART => "carts".to_string(),
        PURCHASE => "purchases".to_string(),
        other => other.to_string(),
    }
}

/// Pivot per-user event counts into one column per canonical type.
///
/// The column set is every type present in the dataset, ordered by
/// canonical name; missing (user, type) combinations are 0. Exactly one
/// row per user, sorted by user_id. The three core types get readable
/// column names (`views`, `carts`, `purchases`); anything else keeps its
/// canonical label.
pub fn aggregate_user_funnel(events: &[SessionEvent]) -> Result<UserFunnel> {
    if events.is_empty() {
        return Err(Error::EmptyInput("aggregate_user_funnel"));
    }

    let mut types: BTreeSet<&str> = BTreeSet::new();
    let mut users: BTreeMap<&str, HashMap<&str, u64>> = BTreeMap::new();
    for event in events {
        types.insert(event.event_type());
        *users
            .entry(event.user_id())
            .or_default()
            .entry(event.event_type())
            .or_insert(0) += 1;
    }

    let canonical: Vec<&str> = types.into_iter().collect();
    let columns = canonical.iter().map(|t| display_column(t)).collect();

    let rows = users
        .into_iter()
        .map(|(user_id, tally)| FunnelRow {
            user_id: user_id.to_string(),
            counts: canonical
                .iter()
                .map(|t| tally.get(t).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    Ok(UserFunnel { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign_sessions;
    use chrono::TimeZone;
    use evstream_types::Event;

    fn event_at(user_id: &str, event_type: &str, h: u32, m: u32, s: u32) -> Event {
        Event {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap(),
            user_id: user_id.to_string(),
            event_type: event_type.to_string(),
            extra: Default::default(),
        }
    }

    fn sessionized(events: Vec<Event>) -> Vec<SessionEvent> {
        assign_sessions(events, 30).unwrap()
    }

    #[test]
    fn test_by_minute_truncates_and_sorts() {
        let events = sessionized(vec![
            event_at("u1", "view", 9, 0, 10),
            event_at("u1", "view", 9, 0, 45),
            event_at("u1", "cart", 9, 2, 0),
        ]);
        let counts = aggregate_by_minute(&events).unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(
            counts[0].minute,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(counts[0].events_count, 2);
        assert_eq!(
            counts[1].minute,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 2, 0).unwrap()
        );
        assert_eq!(counts[1].events_count, 1);
        assert!(counts.windows(2).all(|w| w[0].minute < w[1].minute));
    }

    #[test]
    fn test_by_type_sorts_descending_with_stable_ties() {
        let events = sessionized(vec![
            event_at("u1", "cart", 9, 0, 0),
            event_at("u1", "view", 9, 1, 0),
            event_at("u1", "view", 9, 2, 0),
            event_at("u1", "purchase", 9, 3, 0),
        ]);
        let counts = aggregate_by_type(&events).unwrap();

        assert_eq!(counts[0].event_type, "view");
        assert_eq!(counts[0].events_count, 2);
        // cart and purchase tie at 1; cart appeared first
        assert_eq!(counts[1].event_type, "cart");
        assert_eq!(counts[2].event_type, "purchase");
    }

    #[test]
    fn test_by_type_conserves_total() {
        let events = sessionized(vec![
            event_at("u1", "view", 9, 0, 0),
            event_at("u2", "cart", 9, 1, 0),
            event_at("u2", "view", 9, 2, 0),
        ]);
        let counts = aggregate_by_type(&events).unwrap();

        let total: u64 = counts.iter().map(|c| c.events_count).sum();
        assert_eq!(total, events.len() as u64);
    }

    #[test]
    fn test_user_funnel_pivot() {
        let events = sessionized(vec![
            event_at("u1", "view", 9, 0, 0),
            event_at("u1", "view", 9, 1, 0),
            event_at("u1", "view", 9, 2, 0),
            event_at("u1", "cart", 9, 3, 0),
            event_at("u2", "purchase", 9, 4, 0),
        ]);
        let funnel = aggregate_user_funnel(&events).unwrap();

        assert_eq!(funnel.columns, vec!["carts", "purchases", "views"]);
        assert_eq!(funnel.rows.len(), 2);

        let u1 = &funnel.rows[0];
        assert_eq!(u1.user_id, "u1");
        assert_eq!(funnel.count(u1, "views"), 3);
        assert_eq!(funnel.count(u1, "carts"), 1);
        assert_eq!(funnel.count(u1, "purchases"), 0);

        let u2 = &funnel.rows[1];
        assert_eq!(u2.user_id, "u2");
        assert_eq!(funnel.count(u2, "purchases"), 1);
        assert_eq!(funnel.count(u2, "views"), 0);
    }

    #[test]
    fn test_user_funnel_keeps_unrecognized_labels() {
        let events = sessionized(vec![
            event_at("u1", "wishlist", 9, 0, 0),
            event_at("u1", "view", 9, 1, 0),
        ]);
        let funnel = aggregate_user_funnel(&events).unwrap();

        assert_eq!(funnel.columns, vec!["views", "wishlist"]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(aggregate_by_minute(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(aggregate_by_type(&[]), Err(Error::EmptyInput(_))));
        assert!(matches!(
            aggregate_user_funnel(&[]),
            Err(Error::EmptyInput(_))
        ));
    }
}
