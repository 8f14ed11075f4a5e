mod support;

use listing_core::ListingType;
use listing_engine::{build_sitemap_xml, write_sitemap, SitemapError, SitemapOptions};
use support::{listing, rentals};

fn options() -> SitemapOptions {
    SitemapOptions {
        base_url: "https://homes.example.com/".to_string(),
        ..SitemapOptions::default()
    }
}

#[test]
fn sitemap_lists_static_pages_and_every_listing() {
    let listings = vec![listing("42", 0, ListingType::Sale), listing("a&b", 30, ListingType::Rent)];
    let xml = build_sitemap_xml(&listings, &options()).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<loc>https://homes.example.com/</loc>"));
    assert!(xml.contains("<loc>https://homes.example.com/rent</loc>"));
    assert!(xml.contains("<loc>https://homes.example.com/property/42</loc>"));
    assert!(xml.contains("<lastmod>2024-05-01</lastmod>"));
    assert!(xml.contains("<loc>https://homes.example.com/property/a&amp;b</loc>"));
    assert!(xml.contains("<lastmod>2024-05-02</lastmod>"));
    assert_eq!(xml.matches("<url>").count(), 2 + options().static_paths.len());
    assert!(xml.trim_end().ends_with("</urlset>"));
}

#[test]
fn relative_base_url_is_rejected() {
    let err = build_sitemap_xml(
        &[],
        &SitemapOptions {
            base_url: "homes.example.com".to_string(),
            ..SitemapOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, SitemapError::InvalidBaseUrl(_)));
}

#[test]
fn sitemap_is_written_into_missing_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    let out = temp.path().join("public");

    let summary = write_sitemap(&out, &rentals(3), &options()).unwrap();

    assert_eq!(summary.output_path, out.join("sitemap.xml"));
    assert_eq!(summary.url_count, 3 + options().static_paths.len());
    let written = std::fs::read_to_string(&summary.output_path).unwrap();
    assert!(written.contains("/property/r02</loc>"));
}
