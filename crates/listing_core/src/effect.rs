use crate::{CatalogQuery, FetchTicket, RowRange};

/// Work the IO layer performs on behalf of the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Count the rows matching `query` and fetch the rows in `range`; report
    /// back with `Msg::PageFetched` carrying the same ticket.
    FetchPage {
        ticket: FetchTicket,
        query: CatalogQuery,
        range: RowRange,
    },
}
