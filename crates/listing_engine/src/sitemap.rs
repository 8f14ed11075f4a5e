use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use listing_core::ListingRecord;
use url::Url;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone)]
pub struct SitemapOptions {
    /// Public site origin, e.g. `https://homes.example.com`.
    pub base_url: String,
    pub static_paths: Vec<String>,
    /// Path prefix of listing detail pages; the listing id is appended.
    pub listing_path: String,
    pub output_filename: String,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            static_paths: ["/", "/rent", "/sale", "/about", "/contact"]
                .into_iter()
                .map(ToOwned::to_owned)
                .collect(),
            listing_path: "/property".to_string(),
            output_filename: "sitemap.xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSummary {
    pub url_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("base url {0:?} must start with http:// or https://")]
    InvalidBaseUrl(String),
}

pub fn build_sitemap_xml(
    listings: &[ListingRecord],
    options: &SitemapOptions,
) -> Result<String, SitemapError> {
    let valid = Url::parse(&options.base_url)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
    if !valid {
        return Err(SitemapError::InvalidBaseUrl(options.base_url.clone()));
    }
    let base = options.base_url.trim_end_matches('/');

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for path in &options.static_paths {
        let priority = if path == "/" { "1.0" } else { "0.7" };
        push_url(&mut xml, &format!("{base}{path}"), None, "daily", priority);
    }
    let listing_path = options.listing_path.trim_end_matches('/');
    for listing in listings {
        let loc = format!("{base}{listing_path}/{}", listing.id);
        let lastmod = listing.created_at.format("%Y-%m-%d").to_string();
        push_url(&mut xml, &loc, Some(&lastmod), "weekly", "0.8");
    }
    xml.push_str("</urlset>\n");
    Ok(xml)
}

/// Builds the sitemap and writes it atomically into `output_dir`.
pub fn write_sitemap(
    output_dir: &Path,
    listings: &[ListingRecord],
    options: &SitemapOptions,
) -> Result<SitemapSummary, SitemapError> {
    let xml = build_sitemap_xml(listings, options)?;
    let writer = AtomicFileWriter::new(output_dir);
    let output_path = writer.write(&options.output_filename, xml.as_bytes())?;
    Ok(SitemapSummary {
        url_count: options.static_paths.len() + listings.len(),
        output_path,
    })
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(loc));
    if let Some(lastmod) = lastmod {
        let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
    }
    let _ = writeln!(xml, "    <changefreq>{changefreq}</changefreq>");
    let _ = writeln!(xml, "    <priority>{priority}</priority>");
    xml.push_str("  </url>\n");
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape_xml("/a?x=1&y=<2>"), "/a?x=1&amp;y=&lt;2&gt;");
    }
}
