//! Listing core: pure feed state machine, data model and query building.
mod cursor;
mod dedup;
mod effect;
mod filter;
mod msg;
mod optimistic;
mod query;
mod record;
mod state;
mod update;
mod view_model;

pub use cursor::{PageCursor, DEFAULT_PAGE_SIZE};
pub use dedup::{dedupe_by_id, merge_page};
pub use effect::Effect;
pub use filter::{
    Choice, FeedScope, FilterParseError, FilterState, PriceRange, RoomCount, ALL, ANY,
    DEFAULT_MAX_PRICE,
};
pub use msg::Msg;
pub use optimistic::Provisional;
pub use query::{CatalogQuery, Column, Direction, OrderBy, Predicate, QueryValue, RowRange};
pub use record::{ListingId, ListingRecord, ListingType};
pub use state::{FeedError, FeedState, FetchTicket, FetchedPage};
pub use update::update;
pub use view_model::{FeedViewModel, ListingRowView};
