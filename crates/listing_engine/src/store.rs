use std::sync::Arc;

use futures_util::future::try_join;
use listing_core::{CatalogQuery, FetchedPage, ListingRecord, RowRange};

use crate::StoreError;

/// Read access to the remote listing table.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of rows matching `query`, ignoring any range.
    async fn count(&self, query: &CatalogQuery) -> Result<u64, StoreError>;

    /// Rows matching `query` in its order, restricted to `range`.
    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        range: RowRange,
    ) -> Result<Vec<ListingRecord>, StoreError>;
}

#[async_trait::async_trait]
impl<S: CatalogStore + ?Sized> CatalogStore for Arc<S> {
    async fn count(&self, query: &CatalogQuery) -> Result<u64, StoreError> {
        self.as_ref().count(query).await
    }

    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        range: RowRange,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        self.as_ref().fetch_page(query, range).await
    }
}

/// Runs the count and the page query together; either failure fails both.
pub async fn fetch_page_with_count(
    store: &dyn CatalogStore,
    query: &CatalogQuery,
    range: RowRange,
) -> Result<FetchedPage, StoreError> {
    let (total_count, rows) = try_join(store.count(query), store.fetch_page(query, range)).await?;
    Ok(FetchedPage { rows, total_count })
}
