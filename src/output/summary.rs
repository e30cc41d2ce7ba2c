//! Run summary for a complete harvest

use crate::Advisory;
use std::path::PathBuf;

/// Counts gathered over one `run_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Schedule pages generated from the configuration
    pub schedule_links: usize,

    /// Match-history stats links discovered
    pub match_links: usize,

    /// Merged records handed to the persister
    pub games_persisted: usize,

    /// Directory the records were written to
    pub output_dir: Option<PathBuf>,

    /// Non-fatal conditions raised along the way
    pub advisories: Vec<Advisory>,
}

impl HarvestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no stats link was found, so nothing was downloaded
    pub fn is_empty(&self) -> bool {
        self.match_links == 0
    }
}

/// Prints a summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    println!("=== Harvest Summary ===\n");
    println!("  Schedule pages:  {}", summary.schedule_links);
    println!("  Match links:     {}", summary.match_links);
    println!("  Games saved:     {}", summary.games_persisted);
    if let Some(dir) = &summary.output_dir {
        println!("  Output:          {}", dir.display());
    }

    if !summary.advisories.is_empty() {
        println!("\nAdvisories:");
        for advisory in &summary.advisories {
            println!("  - {}", advisory);
        }
    }
}
