//! Store-agnostic description of a catalog query.
//!
//! The feed only ever builds a conjunction of [`Predicate`]s, an ordering and
//! a row range. Adapters translate this into their own dialect.

use crate::{FeedScope, RoomCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ListingType,
    PropertyType,
    Bedrooms,
    Bathrooms,
    Price,
    Tags,
    /// Full-text search document maintained by the store.
    SearchDocument,
    CreatedAt,
}

impl Column {
    pub fn as_str(self) -> &'static str {
        match self {
            Column::ListingType => "listing_type",
            Column::PropertyType => "property_type",
            Column::Bedrooms => "bedrooms",
            Column::Bathrooms => "bathrooms",
            Column::Price => "price",
            Column::Tags => "tags",
            Column::SearchDocument => "fts",
            Column::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Int(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: Column, value: QueryValue },
    /// Inclusive on both ends.
    Between { column: Column, min: f64, max: f64 },
    ContainsAll { column: Column, values: Vec<String> },
    /// Natural-language search, not substring matching.
    TextSearch { column: Column, query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: Column,
    pub direction: Direction,
}

/// Filter and ordering shared by the count query and every page query of a
/// scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub predicates: Vec<Predicate>,
    pub order: OrderBy,
}

impl CatalogQuery {
    pub fn for_scope(scope: &FeedScope) -> Self {
        let filter = scope.filter();
        let mut predicates = Vec::new();

        if let Some(listing_type) = filter.listing_type.as_only() {
            predicates.push(Predicate::Eq {
                column: Column::ListingType,
                value: QueryValue::Text(listing_type.as_str().to_string()),
            });
        }
        if let Some(property_type) = filter.property_type.as_only() {
            predicates.push(Predicate::Eq {
                column: Column::PropertyType,
                value: QueryValue::Text(property_type.clone()),
            });
        }
        push_room_count(&mut predicates, Column::Bedrooms, filter.bedrooms);
        push_room_count(&mut predicates, Column::Bathrooms, filter.bathrooms);

        if !filter.price.is_unbounded() {
            predicates.push(Predicate::Between {
                column: Column::Price,
                min: filter.price.min(),
                max: filter.price.max(),
            });
        }

        if let Some(term) = scope.search() {
            predicates.push(Predicate::TextSearch {
                column: Column::SearchDocument,
                query: term.to_string(),
            });
        }
        if !filter.tags.is_empty() {
            predicates.push(Predicate::ContainsAll {
                column: Column::Tags,
                values: filter.tags.clone(),
            });
        }

        Self {
            predicates,
            order: OrderBy {
                column: Column::CreatedAt,
                direction: Direction::Ascending,
            },
        }
    }
}

fn push_room_count(predicates: &mut Vec<Predicate>, column: Column, count: RoomCount) {
    if let RoomCount::Exactly(n) = count {
        predicates.push(Predicate::Eq {
            column,
            value: QueryValue::Int(n),
        });
    }
}

/// Inclusive row window `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// Window for a 0-based page. `page_size` must be non-zero.
    pub fn for_page(page_index: u32, page_size: u32) -> Self {
        let size = u64::from(page_size.max(1));
        let from = u64::from(page_index) * size;
        Self {
            from,
            to: from + size - 1,
        }
    }

    pub fn offset(&self) -> u64 {
        self.from
    }

    pub fn limit(&self) -> u64 {
        self.to - self.from + 1
    }
}
