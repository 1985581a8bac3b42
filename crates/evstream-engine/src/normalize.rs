use evstream_types::{Event, CART, PURCHASE, VIEW};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known variants of the canonical labels.
///
/// Keys are already cleaned (lowercase, trimmed); lookups must clean first.
static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("view", VIEW),
        ("product_view", VIEW),
        ("pageview", VIEW),
        ("page_view", VIEW),
        ("cart", CART),
        ("add_to_cart", CART),
        ("add-cart", CART),
        ("purchase", PURCHASE),
        ("buy", PURCHASE),
        ("order", PURCHASE),
    ])
});

/// Clean a raw event type label and map it to its canonical form.
///
/// Lowercases, trims surrounding whitespace, then applies the synonym
/// table. Labels outside the table are not an error; the cleaned form
/// passes through as-is.
pub fn canonical_label(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase();
    match SYNONYMS.get(cleaned.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => cleaned,
    }
}

/// Canonicalize `event_type` across a batch of events.
///
/// Pure transform: output has the same length and order as the input, and
/// only `event_type` changes.
pub fn normalize(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .map(|mut event| {
            event.event_type = canonical_label(&event.event_type);
            event
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(event_type: &str) -> Event {
        Event {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            user_id: "u1".to_string(),
            event_type: event_type.to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        assert_eq!(canonical_label("Pageview "), "view");
        assert_eq!(canonical_label("add_to_cart"), "cart");
        assert_eq!(canonical_label("BUY"), "purchase");
        assert_eq!(canonical_label("order"), "purchase");
        assert_eq!(canonical_label("page_view"), "view");
    }

    #[test]
    fn test_unknown_labels_pass_through_cleaned() {
        assert_eq!(canonical_label("  Wishlist "), "wishlist");
        assert_eq!(canonical_label("refund"), "refund");
    }

    #[test]
    fn test_normalize_preserves_length_and_order() {
        let events = vec![event("BUY"), event("unknown_thing"), event("pageview")];
        let normalized = normalize(events);

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].event_type, "purchase");
        assert_eq!(normalized[1].event_type, "unknown_thing");
        assert_eq!(normalized[2].event_type, "view");
    }
}
