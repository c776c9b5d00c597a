// src/fetch/http.rs
// =============================================================================
// The default Fetcher: a plain HTTP GET with reqwest.
//
// How a fetch goes:
// 1. GET the page (the client carries the timeout, 10 seconds by default)
// 2. Anything other than a 2xx status is an error for that page
// 3. Read the body as text
// 4. Hand the body to the Picker to get the page's links
//
// There is no retry. A failed page is reported once and its branch of the
// crawl simply ends there.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{AttrPicker, Fetcher, Picker};
use crate::error::CrawlError;

/// Request timeout used when no client is supplied
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    picker: Arc<dyn Picker>,
}

impl HttpFetcher {
    // A fetcher with its own client (using `timeout`) and the anchor picker
    pub fn new(timeout: Duration) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self::with_client(client))
    }

    /// Wraps an existing client. Its timeout and redirect policy are used as-is.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            picker: Arc::new(AttrPicker::anchors()),
        }
    }

    /// Replaces the link-extraction strategy
    pub fn with_picker<P: Picker + 'static>(mut self, picker: P) -> Self {
        self.picker = Arc::new(picker);
        self
    }

    async fn get_body(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CrawlError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.clone(),
                status,
            });
        }

        response.text().await.map_err(|source| CrawlError::Body {
            url: url.clone(),
            source,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Url>, CrawlError> {
        let body = self.get_body(url).await?;

        // Links resolve against the requested URL, not any redirect target
        let links = self.picker.pick(url, &body);
        debug!(%url, links = links.len(), bytes = body.len(), "fetched page");

        Ok(links)
    }
}
