use crate::{FetchTicket, FetchedPage, FilterState};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Filter or search input changed; start a new page sequence.
    Reset {
        filter: FilterState,
        search: Option<String>,
    },
    /// Explicit request for the next page (e.g. a retry button).
    LoadNextPage,
    /// The last rendered item scrolled into view.
    SentinelVisible,
    /// The IO layer finished a fetch issued through `Effect::FetchPage`.
    PageFetched {
        ticket: FetchTicket,
        result: Result<FetchedPage, String>,
    },
}
