use crate::details::{extract_details_from_markup, parse_movie_details};
use crate::extract::extract_movies;
use crate::types::{MovieDetails, MovieRecord};

use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use scraper::Html;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header name: '{0}'")]
    InvalidHeaderName(String),
    #[error("Invalid value for header '{0}'")]
    InvalidHeaderValue(String),
}

/// Request settings handed to [`MovieScraper::new`].
///
/// The default mimics a desktop browser because some sites refuse or rewrite
/// pages for unknown clients.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub headers: HeaderMap,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(crate::DEFAULT_USER_AGENT),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(crate::DEFAULT_ACCEPT_LANGUAGE),
        );

        Self {
            timeout: crate::DEFAULT_TIMEOUT,
            headers,
        }
    }
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a header, replacing any existing value under the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, FetchError> {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|_| FetchError::InvalidHeaderName(name.to_string()))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|_| FetchError::InvalidHeaderValue(name.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct MovieScraper {
    client: Client,
}

impl MovieScraper {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(config.headers)
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::debug!("Transport error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::debug!("Decode error: {e:?}"))?)
    }

    /// Fetches `url` and extracts its movie listings.
    ///
    /// Never fails: a fetch error is logged and turns into an empty list.
    pub async fn scrape(&self, url: &str) -> Vec<MovieRecord> {
        self.scrape_with(url, extract_movies).await
    }

    pub async fn scrape_with<F>(&self, url: &str, extract: F) -> Vec<MovieRecord>
    where
        F: FnOnce(&Html, &str) -> Vec<MovieRecord>,
    {
        log::info!("Scraping data from: {}", url);

        let html = match self.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("Request error: {}", e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(&html);
        extract(&document, url)
    }

    pub async fn fetch_movie_details(&self, url: &str) -> MovieDetails {
        match self.fetch(url).await {
            Ok(html) => parse_movie_details(&html),
            Err(e) => {
                log::warn!("Failed to fetch details from {}: {}", url, e);
                MovieDetails::default()
            }
        }
    }

    /// Attaches details to every record, one request at a time. Records
    /// without a link are described from their own markup.
    pub async fn enrich(&self, records: &mut [MovieRecord]) {
        for record in records.iter_mut() {
            let details = if record.link.is_empty() {
                extract_details_from_markup(&record.raw_markup)
            } else {
                log::info!("Fetching details for '{}'", record.label());
                self.fetch_movie_details(&record.link).await
            };
            record.details = Some(details);
        }
    }
}
