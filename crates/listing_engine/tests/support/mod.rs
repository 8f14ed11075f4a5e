#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use listing_core::{ListingId, ListingRecord, ListingType};

pub fn listing(id: &str, seq: i64, listing_type: ListingType) -> ListingRecord {
    ListingRecord {
        id: ListingId::new(id),
        title: format!("Listing {id}"),
        description: Some("Bright rooms close to the park".to_string()),
        listing_type,
        property_type: "apartment".to_string(),
        bedrooms: 2,
        bathrooms: 1,
        price: 1500.0,
        currency: "EUR".to_string(),
        location: "Riverside".to_string(),
        images: Vec::new(),
        tags: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::hours(seq),
    }
}

pub fn rentals(count: usize) -> Vec<ListingRecord> {
    (0..count)
        .map(|n| listing(&format!("r{n:02}"), n as i64, ListingType::Rent))
        .collect()
}

pub fn ids(rows: &[ListingRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
}
