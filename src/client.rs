//! HTTP client for hosted storefront pages.

use std::time::Duration;

use crate::{
    extract::extract_embedded_state, normalize::normalize_catalog, store_url::validate_store_url,
    types::StoreCatalog, user_agent::get_user_agent, Error,
};

/// Ceiling on the HTML body size. A storefront page is a few hundred
/// kilobytes; anything past this is not a page worth scanning.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Per-request timeout. The host renders slowly under load, but anything
/// past this is treated as down.
const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Client for fetching and parsing hosted storefront pages.
///
/// Sends browser-like headers so the host serves the hydrated page.
/// Holds no state besides the connection pool; independent parses can
/// share one instance freely.
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client pointing at the production storefront host.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url("https://take.app")
    }

    /// Creates a client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::FetchFailed {
                status: None,
                message: format!("failed to build http client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Runs the whole pipeline for one storefront URL: validate, fetch,
    /// extract, normalize, assemble.
    pub async fn fetch_catalog(&self, store_url: &str) -> Result<StoreCatalog, Error> {
        let validated = validate_store_url(store_url)?;
        tracing::debug!(store_id = %validated.store_id, "fetching store page");

        let html = self.fetch_html(&validated.store_id).await?;
        let state = extract_embedded_state(&html)?;
        let (store, products) = normalize_catalog(&state)?;

        let catalog = StoreCatalog::assemble(store, products);
        tracing::debug!(
            store_id = %validated.store_id,
            total = catalog.total_products,
            "store page parsed"
        );
        Ok(catalog)
    }

    /// Issues the single GET for a store page. No retries here; the caller
    /// decides whether a transient failure is worth another whole parse.
    async fn fetch_html(&self, store_id: &str) -> Result<String, Error> {
        let url = format!("{}/{}", self.base_url, store_id);
        let resp = self
            .http
            .get(&url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("store page request failed: {}", e);
                Error::from(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!("store page returned status {}", status);
            return Err(Error::FetchFailed {
                status: Some(status.as_u16()),
                message: format!("store page returned status {status}"),
            });
        }

        if let Some(len) = resp.content_length() {
            if len as usize > MAX_BODY_BYTES {
                return Err(oversized(len as usize));
            }
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("failed to read store page body: {}", e);
            Error::from(e)
        })?;
        if body.len() > MAX_BODY_BYTES {
            return Err(oversized(body.len()));
        }
        Ok(body)
    }
}

fn oversized(len: usize) -> Error {
    tracing::error!("store page body of {} bytes exceeds cap", len);
    Error::FetchFailed {
        status: None,
        message: format!("store page body of {len} bytes exceeds the {MAX_BODY_BYTES} byte cap"),
    }
}
