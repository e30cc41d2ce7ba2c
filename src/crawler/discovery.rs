//! Two-stage link discovery
//!
//! schedule page → game pages (anchors whose href contains a path filter)
//! → stats links (links of elements matching a CSS selector).

use crate::crawler::parser::{links_in_selection, links_with_href_containing, parse_selector};
use crate::crawler::renderer::PageRenderer;
use crate::{HarvestError, Result};

/// Path fragment identifying game pages on a schedule page
pub const DEFAULT_FIRST_STAGE_FILTER: &str = "/matches/";

/// Selector for the match-history stats link on a game page
pub const DEFAULT_SECOND_STAGE_SELECTOR: &str = ".stats-link";

/// Walks schedule pages down to match-history stats links
pub struct PageCrawler<R> {
    renderer: R,
}

impl<R: PageRenderer> PageCrawler<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Discovers the stats links reachable from one schedule page
    ///
    /// Every game page linked from `schedule_url` is rendered in turn. A
    /// failure on any page aborts the whole call.
    ///
    /// # Arguments
    ///
    /// * `schedule_url` - The schedule page to start from
    /// * `first_stage_filter` - Substring a game page link's `href` must contain
    /// * `second_stage_selector` - CSS selector for stats link elements
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Stats links in discovery order
    /// * `Err(HarvestError::MissingSelector)` - A filter was empty or invalid
    /// * `Err(HarvestError)` - A page failed to render
    pub async fn discover(
        &self,
        schedule_url: &str,
        first_stage_filter: &str,
        second_stage_selector: &str,
    ) -> Result<Vec<String>> {
        check_filters(first_stage_filter, second_stage_selector)?;

        let schedule = self.renderer.render(schedule_url).await?;
        let game_pages =
            links_with_href_containing(&schedule.html, &schedule.url, first_stage_filter);
        tracing::debug!(
            "Found {} game pages on {}",
            game_pages.len(),
            schedule_url
        );

        let mut stats_links = Vec::new();
        for game_page in &game_pages {
            let page = self.renderer.render(game_page).await?;
            // Parsed per page so no selector is held across an await
            let selector = parse_selector(second_stage_selector)?;
            let found = links_in_selection(&page.html, &page.url, &selector);
            tracing::debug!("Found {} stats links on {}", found.len(), game_page);
            stats_links.extend(found);
        }

        Ok(stats_links)
    }

    /// Runs [`discover`](Self::discover) over a sequence of schedule pages
    ///
    /// Results are concatenated in input order.
    pub async fn discover_all(
        &self,
        schedule_urls: &[String],
        first_stage_filter: &str,
        second_stage_selector: &str,
    ) -> Result<Vec<String>> {
        check_filters(first_stage_filter, second_stage_selector)?;

        let mut stats_links = Vec::new();
        for url in schedule_urls {
            let found = self
                .discover(url, first_stage_filter, second_stage_selector)
                .await?;
            stats_links.extend(found);
        }
        Ok(stats_links)
    }
}

/// Rejects empty filters and unparseable selectors before any page is loaded
fn check_filters(first_stage_filter: &str, second_stage_selector: &str) -> Result<()> {
    if first_stage_filter.is_empty() {
        return Err(HarvestError::MissingSelector(
            "first stage filter must not be empty".to_string(),
        ));
    }
    if second_stage_selector.trim().is_empty() {
        return Err(HarvestError::MissingSelector(
            "second stage selector must not be empty".to_string(),
        ));
    }
    parse_selector(second_stage_selector).map(|_| ())
}
