use std::collections::HashSet;

use crate::{ListingId, ListingRecord};

/// Stable union of a single page with itself: first occurrence of each id wins.
pub fn dedupe_by_id(page: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut seen = HashSet::with_capacity(page.len());
    page.into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

/// Appends the ids of `page` not already present in `items`, preserving the
/// order of both. Returns how many records were appended.
pub fn merge_page(items: &mut Vec<ListingRecord>, page: Vec<ListingRecord>) -> usize {
    let mut seen: HashSet<ListingId> = items.iter().map(|record| record.id.clone()).collect();
    let before = items.len();
    items.extend(
        page.into_iter()
            .filter(|record| seen.insert(record.id.clone())),
    );
    items.len() - before
}
