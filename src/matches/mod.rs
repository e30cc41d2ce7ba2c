//! Match JSON retrieval
//!
//! Turns match-history stats links into the game and timeline JSON URLs,
//! downloads both, merges them and hands the result to a [`Persister`].
//!
//! [`Persister`]: crate::output::Persister

mod fetcher;
mod json_links;

pub use fetcher::JsonFetcher;
pub use json_links::{GameJsonPair, DEFAULT_API_BASE, MATCH_LINK_PREFIX_LEN};

use serde_json::{Map, Value};

/// A game-stats object overlaid with its timeline object
pub type MergedMatchRecord = Map<String, Value>;

/// Overlays `timeline` onto `game`
///
/// The merge is shallow: a key present in both takes the timeline's value.
pub fn merge_records(game: Map<String, Value>, timeline: Map<String, Value>) -> MergedMatchRecord {
    let mut merged = game;
    merged.extend(timeline);
    merged
}
