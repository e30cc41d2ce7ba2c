//! Page rendering
//!
//! Discovery only needs two things from a page: its final URL and its HTML
//! after client-side content has had time to populate. That capability is the
//! [`PageRenderer`] trait. [`HttpRenderer`] implements it with a plain GET
//! followed by a fixed settle delay.

use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Wait applied after each page load before its links are read
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(10);

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("riftcrawl/", env!("CARGO_PKG_VERSION"));

/// A page ready for link extraction
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Final URL after redirects, used to resolve relative links
    pub url: Url,

    /// Page body
    pub html: String,
}

/// Renders a URL into HTML
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RenderedPage>;
}

/// Builds a new renderer for each batch worker
///
/// Every worker owns the renderer it creates, so no HTTP session is shared
/// between workers. Any `Fn() -> Result<R>` closure is a factory.
pub trait RendererFactory: Send + Sync + 'static {
    type Renderer: PageRenderer + 'static;

    fn create(&self) -> Result<Self::Renderer>;
}

impl<F, R> RendererFactory for F
where
    F: Fn() -> Result<R> + Send + Sync + 'static,
    R: PageRenderer + 'static,
{
    type Renderer = R;

    fn create(&self) -> Result<R> {
        self()
    }
}

/// Builds the HTTP client shared by renderers and the JSON fetcher
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renders pages with a GET request and a settle delay
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
    settle_delay: Duration,
}

impl HttpRenderer {
    /// Creates a renderer with its own HTTP client
    pub fn new(settle_delay: Duration) -> Result<Self> {
        Ok(Self::with_client(build_http_client()?, settle_delay))
    }

    pub fn with_client(client: Client, settle_delay: Duration) -> Self {
        Self {
            client,
            settle_delay,
        }
    }

    /// A factory giving each worker a fresh `HttpRenderer`
    pub fn factory(settle_delay: Duration) -> impl RendererFactory<Renderer = HttpRenderer> {
        move || HttpRenderer::new(settle_delay)
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<RenderedPage> {
        tracing::debug!("Rendering {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(RenderedPage {
            url: final_url,
            html,
        })
    }
}
