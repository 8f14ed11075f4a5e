use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use listing_core::{
    CatalogQuery, Column, Direction, ListingId, ListingRecord, Predicate, QueryValue, RowRange,
};

use crate::{CatalogStore, FailureKind, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture is not a JSON array of listings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog store evaluating queries over rows held in process. Rows can be
/// inserted and removed while a feed pages through them.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    rows: Mutex<Vec<ListingRecord>>,
}

impl InMemoryCatalogStore {
    pub fn new(rows: Vec<ListingRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Loads a JSON array of listings, as exported from the backend table.
    pub fn from_json_file(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path)?;
        let rows: Vec<ListingRecord> = serde_json::from_str(&content)?;
        Ok(Self::new(rows))
    }

    /// Replaces any row with the same id.
    pub fn insert(&self, record: ListingRecord) {
        let mut rows = self.lock();
        rows.retain(|row| row.id != record.id);
        rows.push(record);
    }

    pub fn remove(&self, id: &ListingId) -> Option<ListingRecord> {
        let mut rows = self.lock();
        let position = rows.iter().position(|row| &row.id == id)?;
        Some(rows.remove(position))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ListingRecord>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn matching(&self, query: &CatalogQuery) -> Vec<ListingRecord> {
        let mut rows: Vec<ListingRecord> = self
            .lock()
            .iter()
            .filter(|row| query.predicates.iter().all(|p| matches(row, p)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = compare_on(a, b, query.order.column).then_with(|| a.id.cmp(&b.id));
            match query.order.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        rows
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn count(&self, query: &CatalogQuery) -> Result<u64, StoreError> {
        Ok(self.matching(query).len() as u64)
    }

    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        range: RowRange,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        let offset = usize::try_from(range.offset())
            .map_err(|err| StoreError::new(FailureKind::Unavailable, err.to_string()))?;
        let limit = usize::try_from(range.limit())
            .map_err(|err| StoreError::new(FailureKind::Unavailable, err.to_string()))?;
        Ok(self
            .matching(query)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}

fn matches(row: &ListingRecord, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Eq { column, value } => match (column, value) {
            (Column::ListingType, QueryValue::Text(v)) => row.listing_type.as_str() == v,
            (Column::PropertyType, QueryValue::Text(v)) => row.property_type == *v,
            (Column::Bedrooms, QueryValue::Int(n)) => row.bedrooms == *n,
            (Column::Bathrooms, QueryValue::Int(n)) => row.bathrooms == *n,
            _ => false,
        },
        Predicate::Between { column, min, max } => match column {
            Column::Price => row.price >= *min && row.price <= *max,
            Column::Bedrooms => f64::from(row.bedrooms) >= *min && f64::from(row.bedrooms) <= *max,
            Column::Bathrooms => {
                f64::from(row.bathrooms) >= *min && f64::from(row.bathrooms) <= *max
            }
            _ => false,
        },
        Predicate::ContainsAll { values, .. } => values
            .iter()
            .all(|wanted| row.tags.contains(wanted)),
        Predicate::TextSearch { query, .. } => text_matches(row, query),
    }
}

/// Every word of the query has to occur in one of the searchable fields.
/// Quotes and the websearch `or` keyword carry no meaning here.
fn text_matches(row: &ListingRecord, query: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        row.title,
        row.description.as_deref().unwrap_or_default(),
        row.location,
        row.property_type
    )
    .to_lowercase();
    query
        .split_whitespace()
        .map(|word| word.trim_matches('"').to_lowercase())
        .filter(|word| !word.is_empty() && word != "or")
        .all(|word| haystack.contains(&word))
}

fn compare_on(a: &ListingRecord, b: &ListingRecord, column: Column) -> std::cmp::Ordering {
    match column {
        Column::Price => a.price.total_cmp(&b.price),
        Column::Bedrooms => a.bedrooms.cmp(&b.bedrooms),
        Column::Bathrooms => a.bathrooms.cmp(&b.bathrooms),
        _ => a.created_at.cmp(&b.created_at),
    }
}
