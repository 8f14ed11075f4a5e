//! Listing engine: catalog store adapters and effect execution.
mod engine;
mod memory;
mod persist;
mod postgrest;
mod rest;
mod sitemap;
mod store;
mod types;

pub use engine::EngineHandle;
pub use memory::{FixtureError, InMemoryCatalogStore};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use postgrest::{filter_params, page_params, parse_content_range_total};
pub use rest::{RestCatalogStore, StoreSettings};
pub use sitemap::{build_sitemap_xml, write_sitemap, SitemapError, SitemapOptions, SitemapSummary};
pub use store::{fetch_page_with_count, CatalogStore};
pub use types::{EngineClosed, EngineEvent, FailureKind, StoreError};
