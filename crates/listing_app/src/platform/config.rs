use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use feed_logging::feed_info;
use listing_core::DEFAULT_PAGE_SIZE;
use listing_engine::{CatalogStore, InMemoryCatalogStore, RestCatalogStore, StoreSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub page_size: u32,
    pub log: LogDestination,
    /// Public origin used for sitemap URLs.
    pub site_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            log: LogDestination::File,
            site_base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreConfig {
    Rest {
        endpoint: String,
        #[serde(default = "default_table")]
        table: String,
        /// Name of the environment variable holding the API key.
        #[serde(default)]
        api_key_env: Option<String>,
        #[serde(default)]
        text_search_config: Option<String>,
        #[serde(default = "default_connect_timeout_secs")]
        connect_timeout_secs: u64,
        #[serde(default = "default_request_timeout_secs")]
        request_timeout_secs: u64,
    },
    /// JSON array of listings served from memory.
    Fixture { path: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        let settings = StoreSettings::default();
        StoreConfig::Rest {
            endpoint: settings.endpoint,
            table: settings.table,
            api_key_env: Some("LISTING_FEED_API_KEY".to_string()),
            text_search_config: None,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
        }
    }
}

fn default_table() -> String {
    StoreSettings::default().table
}

fn default_connect_timeout_secs() -> u64 {
    StoreSettings::default().connect_timeout.as_secs()
}

fn default_request_timeout_secs() -> u64 {
    StoreSettings::default().request_timeout.as_secs()
}

/// Reads `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };
    parse_config(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    Ok(ron::from_str(content)?)
}

pub fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match config {
        StoreConfig::Rest {
            endpoint,
            table,
            api_key_env,
            text_search_config,
            connect_timeout_secs,
            request_timeout_secs,
        } => {
            let api_key = api_key_env
                .as_deref()
                .and_then(|name| std::env::var(name).ok());
            let store = RestCatalogStore::new(StoreSettings {
                endpoint: endpoint.clone(),
                table: table.clone(),
                api_key,
                text_search_config: text_search_config.clone(),
                connect_timeout: Duration::from_secs(*connect_timeout_secs),
                request_timeout: Duration::from_secs(*request_timeout_secs),
            })?;
            feed_info!("using REST catalog at {} table={}", endpoint, table);
            Ok(Arc::new(store))
        }
        StoreConfig::Fixture { path } => {
            let store = InMemoryCatalogStore::from_json_file(path)
                .with_context(|| format!("failed to load fixture {}", path.display()))?;
            feed_info!("using fixture catalog {:?} with {} listings", path, store.len());
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_rest_config_fills_defaults() {
        let config = parse_config(
            r#"(
                store: Rest(endpoint: "https://db.example.com/rest/v1", text_search_config: Some("english")),
                page_size: 20,
            )"#,
        )
        .unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.log, LogDestination::File);
        match config.store {
            StoreConfig::Rest {
                table,
                request_timeout_secs,
                text_search_config,
                ..
            } => {
                assert_eq!(table, "properties");
                assert_eq!(request_timeout_secs, 30);
                assert_eq!(text_search_config.as_deref(), Some("english"));
            }
            other => panic!("unexpected store {other:?}"),
        }
    }

    #[test]
    fn fixture_store_opens_from_json() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("listings.json");
        fs::write(&path, "[]").unwrap();
        let config = parse_config(&format!("(store: Fixture(path: {:?}))", path)).unwrap();
        assert!(open_store(&config.store).is_ok());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "(page_size: \"many\")").unwrap();
        assert!(load_config(&path).is_err());
    }
}
