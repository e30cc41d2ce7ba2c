//! Game and timeline JSON URLs for a match-history link
//!
//! Match-history links look like
//!
//! ```text
//! https://matchhistory.na.leagueoflegends.com/en/#match-details/TRLH1/1002440062?gameHash=a3b08c115923f00d&tab=overview
//! ```
//!
//! and the two JSON documents for that game live at
//!
//! ```text
//! https://acs.leagueoflegends.com/v1/stats/game/TRLH1/1002440062?gameHash=a3b08c115923f00d&tab=overview
//! https://acs.leagueoflegends.com/v1/stats/game/TRLH1/1002440062/timeline?gameHash=a3b08c115923f00d&tab=overview
//! ```
//!
//! The split is positional and tied to this exact layout: the first 62
//! characters are skipped, the rest is cut on `/` and then on `?`. A change
//! in the site's link layout yields wrong URLs rather than an error.

use crate::{HarvestError, Result};

/// Length of `https://matchhistory.na.leagueoflegends.com/en/#match-details/`
pub const MATCH_LINK_PREFIX_LEN: usize = 62;

/// Stats API root the JSON URLs are built on
pub const DEFAULT_API_BASE: &str = "https://acs.leagueoflegends.com/v1/stats/game/";

/// The two JSON resources for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameJsonPair {
    pub game_url: String,
    pub timeline_url: String,
}

impl GameJsonPair {
    /// Derives both JSON URLs from a match-history link
    ///
    /// # Example
    ///
    /// ```
    /// use riftcrawl::matches::{GameJsonPair, DEFAULT_API_BASE};
    ///
    /// let link = "https://matchhistory.na.leagueoflegends.com/en/#match-details/TRLH1/1002440062?gameHash=a3b08c115923f00d";
    /// let pair = GameJsonPair::from_match_link(link, DEFAULT_API_BASE).unwrap();
    /// assert_eq!(
    ///     pair.timeline_url,
    ///     "https://acs.leagueoflegends.com/v1/stats/game/TRLH1/1002440062/timeline?gameHash=a3b08c115923f00d"
    /// );
    /// ```
    pub fn from_match_link(link: &str, api_base: &str) -> Result<Self> {
        let malformed = || HarvestError::MalformedMatchLink(link.to_string());

        let tail = match link.char_indices().nth(MATCH_LINK_PREFIX_LEN) {
            Some((offset, _)) => &link[offset..],
            None => "",
        };

        let mut segments = tail.split('/');
        let region_code = segments.next().ok_or_else(malformed)?;
        let rest = segments.next().ok_or_else(malformed)?;

        let mut parts = rest.split('?');
        let game_id = parts.next().ok_or_else(malformed)?;
        let query = parts.next().ok_or_else(malformed)?;

        Ok(Self {
            game_url: format!("{}{}/{}?{}", api_base, region_code, game_id, query),
            timeline_url: format!("{}{}/{}/timeline?{}", api_base, region_code, game_id, query),
        })
    }

    /// File name for this game's merged record
    ///
    /// Built from the seventh and eighth `/`-separated segments of the game
    /// URL: `game_{segment 6}_{first ten characters of segment 7}.json`. With
    /// the default API root that is the platform code and the game id.
    pub fn file_name(&self) -> Result<String> {
        let segments: Vec<&str> = self.game_url.split('/').collect();
        let (Some(first), Some(second)) = (segments.get(6), segments.get(7)) else {
            return Err(HarvestError::MalformedMatchLink(self.game_url.clone()));
        };

        let head: String = second.chars().take(10).collect();
        Ok(format!("game_{}_{}.json", first, head))
    }
}
