//! Catalog client implementation
//!
//! This module handles all HTTP traffic against the STAC API, including:
//! - Building HTTP clients with proper user agent strings
//! - POSTing search requests and following pagination links
//! - Fetching and caching SAS signing tokens
//! - Error classification

use crate::catalog::item::{ItemPage, StacItem};
use crate::catalog::stream::ItemStream;
use crate::config::CatalogConfig;
use crate::geo::{BoundingBox, TimeRange};
use crate::{Result, SweepError};
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;

/// Default page size requested from the search endpoint
const PAGE_SIZE: usize = 100;

/// Slack subtracted from a token's expiry before it is considered stale
const TOKEN_EXPIRY_SLACK_SECS: i64 = 60;

/// A pending request for one page of search results
#[derive(Debug, Clone)]
pub(crate) enum PageRequest {
    /// POST a search body (the initial request, or a POST-style next link)
    Post { url: String, body: serde_json::Value },

    /// GET a pre-built pagination URL
    Get { url: String },
}

impl PageRequest {
    fn url(&self) -> &str {
        match self {
            PageRequest::Post { url, .. } => url,
            PageRequest::Get { url } => url,
        }
    }
}

/// SAS token response from the signing endpoint
#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    token: String,

    #[serde(rename = "msft:expiry")]
    expiry: DateTime<Utc>,
}

/// Builds an HTTP client with proper configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    // Format: sar-sweep/<version>
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(std::time::Duration::from_secs(30))
        .connect_timeout(std::time::Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for a remote STAC catalog search API
///
/// The client is cheap to share by reference; all request state lives per
/// call except the signing token, which is cached until shortly before its
/// expiry.
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
    search_url: String,
    token_cache: Mutex<Option<TokenResponse>>,
}

impl CatalogClient {
    /// Creates a catalog client for the configured endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - The catalog endpoint configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CatalogClient)` - Successfully built client
    /// * `Err(SweepError)` - The endpoint URL is malformed or the HTTP
    ///   client could not be constructed
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Fail early on a malformed endpoint instead of at first search
        url::Url::parse(&config.api_url)?;

        let search_url = format!("{}/search", config.api_url.trim_end_matches('/'));
        let http = build_http_client()?;

        tracing::debug!("Initialized catalog client for {}", config.api_url);

        Ok(Self {
            http,
            config,
            search_url,
            token_cache: Mutex::new(None),
        })
    }

    /// The catalog configuration this client was built from
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Searches the catalog eagerly, returning all matching items
    ///
    /// Follows pagination links until the result set is exhausted or the
    /// item cap is reached.
    ///
    /// # Arguments
    ///
    /// * `bbox` - Geographic search area
    /// * `range` - Acquisition time range
    /// * `limit` - Maximum number of items to return; falls back to the
    ///   configured limit, then to unbounded
    pub async fn search(
        &self,
        bbox: &BoundingBox,
        range: &TimeRange,
        limit: Option<usize>,
    ) -> Result<Vec<StacItem>> {
        tracing::info!(
            "Searching catalog: bbox={}, datetime={}, limit={:?}",
            bbox,
            range,
            limit.or(self.config.limit)
        );

        let items = self.search_stream(bbox, range, limit).collect().await?;

        tracing::info!("Found {} items", items.len());
        if items.is_empty() {
            tracing::warn!("No items found for bbox={}, datetime={}", bbox, range);
        }

        Ok(items)
    }

    /// Starts a lazy search over the same result set as [`search`](Self::search)
    ///
    /// No request is issued until the first pull, and pages are fetched only
    /// as the consumer drains them. Every call starts a fresh stream from
    /// the beginning of the matching result set.
    pub fn search_stream(
        &self,
        bbox: &BoundingBox,
        range: &TimeRange,
        limit: Option<usize>,
    ) -> ItemStream<'_> {
        let effective_limit = limit.or(self.config.limit);
        let page_limit = effective_limit.map_or(PAGE_SIZE, |cap| cap.min(PAGE_SIZE));

        let first = PageRequest::Post {
            url: self.search_url.clone(),
            body: self.search_body(bbox, range, page_limit),
        };

        ItemStream::new(self, first, effective_limit)
    }

    /// Signs item assets for token-gated catalogs
    ///
    /// When a signing endpoint is configured, fetches a SAS token for the
    /// collection (cached until expiry) and appends it to every asset href.
    /// Without a signing endpoint the items pass through unchanged.
    pub async fn sign_items(&self, mut items: Vec<StacItem>) -> Result<Vec<StacItem>> {
        if self.config.sign_url.is_none() {
            tracing::debug!("No signing endpoint configured, returning items unsigned");
            return Ok(items);
        }

        tracing::debug!("Signing {} items", items.len());
        let token = self.signing_token().await?;

        for item in &mut items {
            for asset in item.assets.values_mut() {
                asset.href = append_token(&asset.href, &token);
            }
        }

        tracing::debug!("All items signed successfully");
        Ok(items)
    }

    /// Searches and signs in one call
    pub async fn search_and_sign(
        &self,
        bbox: &BoundingBox,
        range: &TimeRange,
        limit: Option<usize>,
    ) -> Result<Vec<StacItem>> {
        let items = self.search(bbox, range, limit).await?;
        self.sign_items(items).await
    }

    /// Fetches one page of search results
    pub(crate) async fn fetch_page(&self, request: &PageRequest) -> Result<ItemPage> {
        let url = request.url().to_string();
        tracing::debug!("Fetching result page: {}", url);

        let response = match request {
            PageRequest::Post { url, body } => self.http.post(url).json(body).send().await,
            PageRequest::Get { url } => self.http.get(url).send().await,
        }
        .map_err(|e| SweepError::Http {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SweepError::Api {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<ItemPage>()
            .await
            .map_err(|e| SweepError::Decode {
                url,
                message: e.to_string(),
            })
    }

    /// Builds the follow-up request for a page's `next` link, if any
    pub(crate) fn next_request(page: &ItemPage) -> Option<PageRequest> {
        let link = page.next_link()?;

        let is_post = link
            .method
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("POST"));

        if is_post {
            Some(PageRequest::Post {
                url: link.href.clone(),
                body: link.body.clone().unwrap_or_else(|| json!({})),
            })
        } else {
            Some(PageRequest::Get {
                url: link.href.clone(),
            })
        }
    }

    /// Builds the JSON body of the initial search request
    fn search_body(
        &self,
        bbox: &BoundingBox,
        range: &TimeRange,
        page_limit: usize,
    ) -> serde_json::Value {
        json!({
            "collections": [self.config.collection],
            "bbox": bbox.to_array(),
            "datetime": range.to_interval(),
            "query": {
                "sat:orbit_state": {"eq": self.config.orbit_state},
                "sar:instrument_mode": {"eq": self.config.instrument_mode},
            },
            "limit": page_limit,
        })
    }

    /// Returns a valid signing token, fetching a fresh one when the cached
    /// token is missing or about to expire
    async fn signing_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.lock().unwrap();
            if let Some(cached) = cache.as_ref() {
                let deadline = Utc::now() + Duration::seconds(TOKEN_EXPIRY_SLACK_SECS);
                if cached.expiry > deadline {
                    return Ok(cached.token.clone());
                }
            }
        }

        let sign_url = self
            .config
            .sign_url
            .as_deref()
            .ok_or_else(|| SweepError::Signing {
                collection: self.config.collection.clone(),
                message: "no signing endpoint configured".to_string(),
            })?;

        let token_url = format!(
            "{}/{}",
            sign_url.trim_end_matches('/'),
            self.config.collection
        );
        tracing::debug!("Fetching signing token from {}", token_url);

        let response =
            self.http
                .get(&token_url)
                .send()
                .await
                .map_err(|e| SweepError::Signing {
                    collection: self.config.collection.clone(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SweepError::Signing {
                collection: self.config.collection.clone(),
                message: format!("token endpoint returned HTTP {}", status.as_u16()),
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| SweepError::Signing {
            collection: self.config.collection.clone(),
            message: format!("malformed token response: {}", e),
        })?;

        let value = token.token.clone();
        *self.token_cache.lock().unwrap() = Some(token);
        Ok(value)
    }
}

/// Appends a SAS token to an asset href as a query string
fn append_token(href: &str, token: &str) -> String {
    if href.contains('?') {
        format!("{}&{}", href, token)
    } else {
        format!("{}?{}", href, token)
    }
}
