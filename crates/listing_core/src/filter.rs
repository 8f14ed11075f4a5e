use std::fmt;
use std::str::FromStr;

use crate::ListingType;

/// Sentinel meaning "no constraint" on listing and property type.
pub const ALL: &str = "all";
/// Sentinel meaning "no constraint" on room counts.
pub const ANY: &str = "any";

pub const DEFAULT_MAX_PRICE: f64 = 10_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("unknown listing type {0:?}")]
    UnknownListingType(String),
    #[error("invalid room count {0:?}")]
    InvalidRoomCount(String),
}

/// Equality constraint that can be switched off with the `all` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T> Choice<T> {
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Choice::All => None,
            Choice::Only(value) => Some(value),
        }
    }
}

impl FromStr for Choice<ListingType> {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Choice::All);
        }
        trimmed.parse().map(Choice::Only)
    }
}

impl FromStr for Choice<String> {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Choice::All)
        } else {
            Ok(Choice::Only(trimmed.to_ascii_lowercase()))
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL),
            Choice::Only(value) => write!(f, "{value}"),
        }
    }
}

/// Exact bedroom/bathroom count, or `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomCount {
    #[default]
    Any,
    Exactly(u32),
}

impl FromStr for RoomCount {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ANY) {
            return Ok(RoomCount::Any);
        }
        trimmed
            .parse::<u32>()
            .map(RoomCount::Exactly)
            .map_err(|_| FilterParseError::InvalidRoomCount(trimmed.to_string()))
    }
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomCount::Any => f.write_str(ANY),
            RoomCount::Exactly(n) => write!(f, "{n}"),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Negative bounds are clamped to zero and reversed bounds are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        let min = min.max(0.0);
        let max = max.max(0.0);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Matches every non-negative price; adds no price predicate.
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min <= 0.0 && self.max == f64::INFINITY
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_MAX_PRICE)
    }
}

/// The user-selected constraints. Compared by value: any field change is a
/// new scope for the feed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub listing_type: Choice<ListingType>,
    pub property_type: Choice<String>,
    pub bedrooms: RoomCount,
    pub bathrooms: RoomCount,
    pub price: PriceRange,
    pub tags: Vec<String>,
}

impl FilterState {
    pub fn with_listing_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = Choice::Only(listing_type);
        self
    }

    /// Property types are matched exactly, in lowercase.
    pub fn with_property_type(mut self, property_type: impl AsRef<str>) -> Self {
        self.property_type = Choice::Only(property_type.as_ref().trim().to_ascii_lowercase());
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = RoomCount::Exactly(bedrooms);
        self
    }

    pub fn with_bathrooms(mut self, bathrooms: u32) -> Self {
        self.bathrooms = RoomCount::Exactly(bathrooms);
        self
    }

    pub fn with_price(mut self, min: f64, max: f64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Filter plus normalized search term: the unit a page sequence belongs to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedScope {
    filter: FilterState,
    search: Option<String>,
}

impl FeedScope {
    pub fn new(filter: FilterState, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(ToOwned::to_owned);
        Self { filter, search }
    }

    /// Every listing regardless of price, for exports that must cover the
    /// whole catalog.
    pub fn whole_catalog() -> Self {
        let filter = FilterState {
            price: PriceRange::unbounded(),
            ..FilterState::default()
        };
        Self::new(filter, None)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}
