//! Harvest orchestration
//!
//! [`Harvester`] strings the stages together: schedule links from the
//! configuration, stats links from the schedule pages, then merged match JSON
//! from the stats links. Each stage stores its output on the harvester so the
//! next stage can pick it up, and each can also be called on its own.

use crate::config::CrawlConfig;
use crate::crawler::{
    BatchScheduler, HttpRenderer, PageCrawler, DEFAULT_FIRST_STAGE_FILTER,
    DEFAULT_SECOND_STAGE_SELECTOR, DEFAULT_SETTLE_DELAY,
};
use crate::links;
use crate::matches::{JsonFetcher, MergedMatchRecord, DEFAULT_API_BASE};
use crate::output::{HarvestSummary, JsonFilePersister, Persister};
use crate::{Advisory, Result};
use std::path::Path;
use std::time::Duration;

/// Tunables for discovery and download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Substring identifying game page links on a schedule page
    pub first_stage_filter: String,

    /// CSS selector for stats links on a game page
    pub second_stage_selector: String,

    /// Wait after each page load
    pub settle_delay: Duration,

    /// Schedule links per batch; batching is used when this or
    /// `worker_count` is set
    pub batch_size: Option<usize>,

    /// Concurrent discovery workers
    pub worker_count: Option<usize>,

    /// Stats API root for the JSON downloads
    pub api_base: String,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            first_stage_filter: DEFAULT_FIRST_STAGE_FILTER.to_string(),
            second_stage_selector: DEFAULT_SECOND_STAGE_SELECTOR.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            batch_size: None,
            worker_count: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl HarvestSettings {
    fn is_batched(&self) -> bool {
        self.batch_size.is_some() || self.worker_count.is_some()
    }
}

/// Runs the harvest stages for one configuration
#[derive(Debug)]
pub struct Harvester {
    config: CrawlConfig,
    settings: HarvestSettings,
    schedule_links: Option<Vec<String>>,
    match_links: Option<Vec<String>>,
    advisories: Vec<Advisory>,
}

impl Harvester {
    /// Creates a harvester with default settings
    pub fn new(config: CrawlConfig) -> Self {
        Self::with_settings(config, HarvestSettings::default())
    }

    pub fn with_settings(config: CrawlConfig, settings: HarvestSettings) -> Self {
        Self {
            config,
            settings,
            schedule_links: None,
            match_links: None,
            advisories: Vec::new(),
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    /// Schedule links from the last [`make_links`](Self::make_links)
    pub fn schedule_links(&self) -> Option<&[String]> {
        self.schedule_links.as_deref()
    }

    /// Stats links from the last [`match_history_links`](Self::match_history_links)
    pub fn match_links(&self) -> Option<&[String]> {
        self.match_links.as_deref()
    }

    /// Advisories raised so far
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Generates and stores the schedule links for the configuration
    pub fn make_links(&mut self) -> Result<&[String]> {
        let generated = links::generate(&self.config)?;
        for advisory in &generated.advisories {
            tracing::warn!("{}", advisory);
        }
        self.advisories.extend(generated.advisories);

        tracing::info!("Generated {} schedule links", generated.value.len());
        Ok(self.schedule_links.insert(generated.value).as_slice())
    }

    /// Discovers and stores the stats links behind the schedule links
    ///
    /// Schedule links are generated first if [`make_links`](Self::make_links)
    /// has not run. With a batch size or worker count set, discovery runs on
    /// a [`BatchScheduler`] and the per-batch results are flattened in batch
    /// order; otherwise one [`PageCrawler`] visits every page in sequence.
    pub async fn match_history_links(&mut self) -> Result<&[String]> {
        if self.schedule_links.is_none() {
            self.make_links()?;
        }
        let schedule_links = self.schedule_links.as_deref().unwrap_or_default();
        let settings = &self.settings;

        let found = if settings.is_batched() {
            let scheduler = BatchScheduler::new(HttpRenderer::factory(settings.settle_delay))
                .with_filters(
                    settings.first_stage_filter.as_str(),
                    settings.second_stage_selector.as_str(),
                );
            scheduler
                .run(schedule_links, settings.batch_size, settings.worker_count)
                .await?
                .concat()
        } else {
            let crawler = PageCrawler::new(HttpRenderer::new(settings.settle_delay)?);
            crawler
                .discover_all(
                    schedule_links,
                    &settings.first_stage_filter,
                    &settings.second_stage_selector,
                )
                .await?
        };

        tracing::info!("Found {} match history links", found.len());
        Ok(self.match_links.insert(found).as_slice())
    }

    /// Downloads the merged JSON for the stored stats links
    ///
    /// # Arguments
    ///
    /// * `out_dir` - Directory to append records to; `None` returns the first
    ///   record instead
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Every record was written to `out_dir`
    /// * `Ok(Some(record))` - No directory: the first merged record
    /// * `Err(HarvestError::EmptyInput)` - No stats links are stored
    pub async fn get_json(&self, out_dir: Option<&Path>) -> Result<Option<MergedMatchRecord>> {
        let links = self.match_links.as_deref().unwrap_or_default();
        let fetcher = JsonFetcher::new()?.with_api_base(self.settings.api_base.as_str());

        match out_dir {
            Some(dir) => {
                let persister = JsonFilePersister::new(dir);
                fetcher.fetch(links, Some(&persister as &dyn Persister)).await
            }
            None => fetcher.fetch(links, None).await,
        }
    }

    /// Runs every stage and writes the records to `out_dir`
    ///
    /// A run that finds no stats links ends without downloading anything and
    /// reports an empty summary.
    pub async fn run_all(&mut self, out_dir: &Path) -> Result<HarvestSummary> {
        tracing::info!(
            "Starting harvest: region {}, split {}, week {}",
            self.config.region,
            self.config.split,
            self.config.week
        );
        let start_time = std::time::Instant::now();

        let schedule_count = self.make_links()?.len();
        let match_count = self.match_history_links().await?.len();

        let mut summary = HarvestSummary {
            schedule_links: schedule_count,
            match_links: match_count,
            output_dir: Some(out_dir.to_path_buf()),
            ..HarvestSummary::new()
        };

        if match_count == 0 {
            tracing::warn!("No match history links found; nothing to download");
        } else {
            self.get_json(Some(out_dir)).await?;
            summary.games_persisted = match_count;
        }
        summary.advisories = self.advisories.clone();

        tracing::info!(
            "Harvest complete: {} games in {:.1}s",
            summary.games_persisted,
            start_time.elapsed().as_secs_f64()
        );
        Ok(summary)
    }
}
