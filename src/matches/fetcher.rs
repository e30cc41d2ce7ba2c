//! JSON fetcher for match-history links
//!
//! Each link yields a [`GameJsonPair`]; both documents are fetched with a GET,
//! must decode to JSON objects, and are merged timeline-over-game. Links are
//! handled one at a time and the first failure ends the call.

use crate::crawler::build_http_client;
use crate::matches::json_links::{GameJsonPair, DEFAULT_API_BASE};
use crate::matches::{merge_records, MergedMatchRecord};
use crate::output::Persister;
use crate::{HarvestError, Result};
use reqwest::Client;
use serde_json::{Map, Value};

/// Downloads and merges game and timeline JSON
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
    api_base: String,
}

impl JsonFetcher {
    /// Creates a fetcher with its own HTTP client and the public stats API root
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the derived JSON URLs at another API root
    ///
    /// The root must end with `/`; it is prepended as-is.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Fetches and merges the JSON behind every match-history link
    ///
    /// # Arguments
    ///
    /// * `links` - Match-history stats links
    /// * `sink` - Where merged records go; `None` returns the first record
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Every record was handed to `sink`
    /// * `Ok(Some(record))` - No sink: the merged record of the first link
    /// * `Err(HarvestError::EmptyInput)` - `links` was empty
    /// * `Err(HarvestError)` - A link was malformed, a request failed, or
    ///   the sink refused a record
    pub async fn fetch(
        &self,
        links: &[String],
        sink: Option<&dyn Persister>,
    ) -> Result<Option<MergedMatchRecord>> {
        if links.is_empty() {
            return Err(HarvestError::EmptyInput);
        }

        let Some(sink) = sink else {
            let (_, record) = self.fetch_one(&links[0]).await?;
            return Ok(Some(record));
        };

        tracing::info!("Fetching JSON for {} matches", links.len());
        for link in links {
            let (pair, record) = self.fetch_one(link).await?;
            let file_name = pair.file_name()?;
            sink.persist(&file_name, &record)?;
            tracing::debug!("Saved {}", file_name);
        }

        Ok(None)
    }

    /// Fetches and merges one link's game and timeline documents
    pub async fn fetch_one(&self, link: &str) -> Result<(GameJsonPair, MergedMatchRecord)> {
        let pair = GameJsonPair::from_match_link(link, &self.api_base)?;
        let game = self.get_object(&pair.game_url).await?;
        let timeline = self.get_object(&pair.timeline_url).await?;
        Ok((pair, merge_records(game, timeline)))
    }

    async fn get_object(&self, url: &str) -> Result<Map<String, Value>> {
        tracing::debug!("GET {}", url);

        let http_error = |source| HarvestError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        match serde_json::from_str::<Value>(&body)? {
            Value::Object(map) => Ok(map),
            _ => Err(HarvestError::NotAnObject {
                url: url.to_string(),
            }),
        }
    }
}
