use std::time::Duration;

use feed_logging::feed_debug;
use listing_core::{CatalogQuery, ListingRecord, RowRange};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use url::Url;

use crate::postgrest::{filter_params, page_params, parse_content_range_total};
use crate::{CatalogStore, FailureKind, StoreError};

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// REST root of the backend, e.g. `https://project.example.co/rest/v1`.
    pub endpoint: String,
    pub table: String,
    pub api_key: Option<String>,
    /// Text search configuration passed to `wfts`, e.g. `english`.
    pub text_search_config: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:54321/rest/v1".to_string(),
            table: "properties".to_string(),
            api_key: None,
            text_search_config: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Catalog store speaking the PostgREST dialect over HTTP.
#[derive(Debug, Clone)]
pub struct RestCatalogStore {
    settings: StoreSettings,
    table_url: Url,
    client: reqwest::Client,
}

impl RestCatalogStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let table_url = table_url(&settings.endpoint, &settings.table)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .default_headers(default_headers(settings.api_key.as_deref())?)
            .build()
            .map_err(|err| StoreError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            table_url,
            client,
        })
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn url_with(&self, params: &[(String, String)]) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().extend_pairs(params);
        url
    }
}

#[async_trait::async_trait]
impl CatalogStore for RestCatalogStore {
    async fn count(&self, query: &CatalogQuery) -> Result<u64, StoreError> {
        let params = filter_params(query, self.settings.text_search_config.as_deref());
        let url = self.url_with(&params);
        feed_debug!("count {}", url);

        let response = self
            .client
            .head(url)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::new(FailureKind::MissingCount, "no total in Content-Range"))
    }

    async fn fetch_page(
        &self,
        query: &CatalogQuery,
        range: RowRange,
    ) -> Result<Vec<ListingRecord>, StoreError> {
        let params = page_params(query, range, self.settings.text_search_config.as_deref());
        let url = self.url_with(&params);
        feed_debug!("fetch {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<Vec<ListingRecord>>()
            .await
            .map_err(map_reqwest_error)
    }
}

fn table_url(endpoint: &str, table: &str) -> Result<Url, StoreError> {
    let mut url =
        Url::parse(endpoint).map_err(|err| StoreError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| StoreError::new(FailureKind::InvalidUrl, "endpoint cannot be a base"))?
        .pop_if_empty()
        .push(table);
    Ok(url)
}

fn default_headers(api_key: Option<&str>) -> Result<HeaderMap, StoreError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = api_key.filter(|key| !key.is_empty()) {
        let invalid = |_| StoreError::new(FailureKind::InvalidUrl, "api key is not a valid header");
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid)?,
        );
    }
    Ok(headers)
}

fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    if err.is_timeout() {
        return StoreError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return StoreError::new(FailureKind::Decode, err.to_string());
    }
    StoreError::new(FailureKind::Network, err.to_string())
}
