use feed_logging::{feed_debug, feed_warn};

use crate::dedup::{dedupe_by_id, merge_page};
use crate::view_model::{FeedViewModel, ListingRowView};
use crate::{CatalogQuery, Effect, FeedScope, ListingRecord, PageCursor, Provisional};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The count or the page query failed; nothing was applied.
    #[error("fetch failed: {message}")]
    FetchFailed { message: String },
    /// A fetch completed after its scope was superseded. Never surfaced.
    #[error("stale response for page {page_index}")]
    StaleResponse { page_index: u32 },
}

/// Identifies what a fetch was issued for. A completion is only applied when
/// its ticket equals the one the feed is still waiting on.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub scope: FeedScope,
    pub page_index: u32,
}

/// Rows of one page plus the unpaginated match count of the scope.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub rows: Vec<ListingRecord>,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedState {
    scope: FeedScope,
    cursor: PageCursor,
    generation: u64,
    items: Vec<ListingRecord>,
    total_count: Option<u64>,
    in_flight: Option<FetchTicket>,
    last_error: Option<FeedError>,
    stale_dropped: u64,
    /// Search whose results are on screen; pending until page 0 of a new
    /// scope lands.
    search_label: Provisional<Option<String>>,
    dirty: bool,
}

impl FeedState {
    pub fn new(page_size: u32) -> Self {
        Self::with_scope(page_size, FeedScope::default())
    }

    /// Starts at page 0 of `scope` without issuing a fetch; the first
    /// `LoadNextPage` or sentinel message loads it.
    pub fn with_scope(page_size: u32, scope: FeedScope) -> Self {
        Self {
            search_label: Provisional::new(scope.search().map(ToOwned::to_owned)),
            scope,
            cursor: PageCursor::new(page_size),
            ..Self::default()
        }
    }

    pub fn view(&self) -> FeedViewModel {
        FeedViewModel {
            items: self.items.iter().map(ListingRowView::from_record).collect(),
            total_count: self.total_count,
            page_index: self.cursor.page_index(),
            is_loading: self.is_loading(),
            has_more: self.has_more(),
            last_error: self.last_error.clone(),
            search: self.search_label.current().clone(),
            search_pending: self.search_label.is_pending(),
            stale_dropped: self.stale_dropped,
            dirty: self.dirty,
        }
    }

    /// Accumulated, deduplicated records in first-seen order.
    pub fn current_items(&self) -> &[ListingRecord] {
        &self.items
    }

    pub fn scope(&self) -> &FeedScope {
        &self.scope
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    pub fn last_error(&self) -> Option<&FeedError> {
        self.last_error.as_ref()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn stale_dropped(&self) -> u64 {
        self.stale_dropped
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True when the page-0 fetch for `scope` is already outstanding.
    pub(crate) fn is_reset_pending_for(&self, scope: &FeedScope) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|ticket| ticket.page_index == 0 && &ticket.scope == scope)
    }

    pub(crate) fn reset_scope(&mut self, scope: FeedScope) {
        if let Some(previous) = self.in_flight.take() {
            feed_debug!(
                "reset supersedes in-flight fetch generation={} page={}",
                previous.generation,
                previous.page_index
            );
        }
        self.generation += 1;
        self.search_label.propose(scope.search().map(ToOwned::to_owned));
        self.scope = scope;
        self.items.clear();
        self.cursor.reset();
        self.total_count = None;
        self.last_error = None;
        self.dirty = true;
    }

    /// Marks the current page as in flight and describes the fetch for it.
    pub(crate) fn issue_fetch(&mut self) -> Effect {
        let ticket = FetchTicket {
            generation: self.generation,
            scope: self.scope.clone(),
            page_index: self.cursor.page_index(),
        };
        self.in_flight = Some(ticket.clone());
        self.dirty = true;
        Effect::FetchPage {
            ticket,
            query: CatalogQuery::for_scope(&self.scope),
            range: self.cursor.range(),
        }
    }

    pub(crate) fn apply_fetched(&mut self, ticket: FetchTicket, result: Result<FetchedPage, String>) {
        if self.in_flight.as_ref() != Some(&ticket) {
            self.stale_dropped += 1;
            feed_debug!(
                "dropping {} (generation={}, current={})",
                FeedError::StaleResponse {
                    page_index: ticket.page_index
                },
                ticket.generation,
                self.generation
            );
            return;
        }
        self.in_flight = None;
        self.dirty = true;

        match result {
            Ok(page) => {
                if ticket.page_index == 0 {
                    self.search_label
                        .confirm(ticket.scope.search().map(ToOwned::to_owned));
                    self.items = dedupe_by_id(page.rows);
                } else {
                    merge_page(&mut self.items, page.rows);
                }
                let accumulated = self.items.len() as u64;
                self.total_count = Some(page.total_count);
                self.cursor.advance(accumulated < page.total_count);
                self.last_error = None;
            }
            Err(message) => {
                feed_warn!("page {} failed: {}", ticket.page_index, message);
                self.last_error = Some(FeedError::FetchFailed { message });
            }
        }
    }
}
