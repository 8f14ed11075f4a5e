use crate::{FeedError, ListingId, ListingRecord, ListingType};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedViewModel {
    pub items: Vec<ListingRowView>,
    pub total_count: Option<u64>,
    pub page_index: u32,
    pub is_loading: bool,
    pub has_more: bool,
    pub last_error: Option<FeedError>,
    pub search: Option<String>,
    /// `search` was just submitted and its first page has not arrived.
    pub search_pending: bool,
    pub stale_dropped: u64,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingRowView {
    pub id: ListingId,
    pub title: String,
    pub listing_type: ListingType,
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub thumbnail: Option<String>,
}

impl ListingRowView {
    pub(crate) fn from_record(record: &ListingRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            listing_type: record.listing_type,
            property_type: record.property_type.clone(),
            bedrooms: record.bedrooms,
            bathrooms: record.bathrooms,
            price: record.price,
            currency: record.currency.clone(),
            location: record.location.clone(),
            thumbnail: record.thumbnail().map(ToOwned::to_owned),
        }
    }
}
