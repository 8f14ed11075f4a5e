use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use listing_core::{Choice, FilterState, ListingType, PriceRange, RoomCount, DEFAULT_MAX_PRICE};

#[derive(Debug, Parser)]
#[command(name = "listing_feed", version, about = "Browse the property catalog from a terminal")]
pub struct Cli {
    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long, default_value = "listing_feed.ron")]
    pub config: PathBuf,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page through listings matching a filter.
    Browse(BrowseArgs),
    /// Write sitemap.xml covering every listing.
    Sitemap {
        #[arg(long, default_value = "public")]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {
    /// `rent`, `sale` or `all`.
    #[arg(long, default_value = "all")]
    pub listing_type: Choice<ListingType>,

    /// e.g. `house`, `apartment`, or `all`.
    #[arg(long, default_value = "all")]
    pub property_type: Choice<String>,

    /// Exact count or `any`.
    #[arg(long, default_value = "any")]
    pub bedrooms: RoomCount,

    /// Exact count or `any`.
    #[arg(long, default_value = "any")]
    pub bathrooms: RoomCount,

    #[arg(long, default_value_t = 0.0)]
    pub min_price: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
    pub max_price: f64,

    /// Required tag; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,
}

impl BrowseArgs {
    pub fn filter(&self) -> FilterState {
        FilterState {
            listing_type: self.listing_type.clone(),
            property_type: self.property_type.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            price: PriceRange::new(self.min_price, self.max_price),
            tags: self.tags.clone(),
        }
    }
}
