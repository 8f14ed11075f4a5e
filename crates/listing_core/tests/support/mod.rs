#![allow(dead_code)]

use std::sync::Once;

use chrono::{Duration, TimeZone, Utc};
use listing_core::{
    update, Effect, FeedState, FetchTicket, FetchedPage, ListingId, ListingRecord, ListingType,
    Msg, RowRange,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

/// Record whose `created_at` grows with `seq`, so `seq` order is store order.
pub fn record(id: &str, seq: i64) -> ListingRecord {
    ListingRecord {
        id: ListingId::new(id),
        title: format!("Listing {id}"),
        description: None,
        listing_type: ListingType::Rent,
        property_type: "apartment".to_string(),
        bedrooms: 2,
        bathrooms: 1,
        price: 1200.0,
        currency: "USD".to_string(),
        location: "Springfield".to_string(),
        images: vec![format!("https://img.example.com/{id}.jpg")],
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(seq),
    }
}

pub fn catalog(count: usize) -> Vec<ListingRecord> {
    (0..count)
        .map(|n| record(&n.to_string(), n as i64))
        .collect()
}

pub fn ids(state: &FeedState) -> Vec<String> {
    state
        .current_items()
        .iter()
        .map(|r| r.id.as_str().to_string())
        .collect()
}

/// Unwraps the single fetch effect an update produced.
pub fn single_fetch(effects: Vec<Effect>) -> (FetchTicket, RowRange) {
    assert_eq!(effects.len(), 1, "expected exactly one fetch, got {effects:?}");
    match effects.into_iter().next() {
        Some(Effect::FetchPage { ticket, range, .. }) => (ticket, range),
        None => unreachable!(),
    }
}

/// Answers a fetch the way a store holding `rows` would.
pub fn answer(ticket: FetchTicket, range: RowRange, rows: &[ListingRecord]) -> Msg {
    let page = rows
        .iter()
        .skip(range.offset() as usize)
        .take(range.limit() as usize)
        .cloned()
        .collect();
    Msg::PageFetched {
        ticket,
        result: Ok(FetchedPage {
            rows: page,
            total_count: rows.len() as u64,
        }),
    }
}

pub fn fail(ticket: FetchTicket, message: &str) -> Msg {
    Msg::PageFetched {
        ticket,
        result: Err(message.to_string()),
    }
}

/// Issues `msg`, answers the resulting fetch from `rows`, and applies it.
pub fn load_from(state: FeedState, msg: Msg, rows: &[ListingRecord]) -> FeedState {
    let (state, effects) = update(state, msg);
    let (ticket, range) = single_fetch(effects);
    let (state, effects) = update(state, answer(ticket, range, rows));
    assert!(effects.is_empty());
    state
}
