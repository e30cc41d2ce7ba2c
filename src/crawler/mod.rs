//! Crawler module for match-history link discovery
//!
//! This module contains the page-walking half of the pipeline:
//! - Page rendering behind the [`PageRenderer`] trait
//! - HTML link extraction for both discovery stages
//! - The two-stage [`PageCrawler`]
//! - The batched worker pool, [`BatchScheduler`]

mod discovery;
mod parser;
mod renderer;
mod scheduler;

pub use discovery::{PageCrawler, DEFAULT_FIRST_STAGE_FILTER, DEFAULT_SECOND_STAGE_SELECTOR};
pub use parser::{links_in_selection, links_with_href_containing, parse_selector};
pub use renderer::{
    build_http_client, HttpRenderer, PageRenderer, RenderedPage, RendererFactory,
    DEFAULT_SETTLE_DELAY, USER_AGENT,
};
pub use scheduler::{create_batches, BatchScheduler};
