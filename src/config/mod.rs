//! Configuration module for Riftcrawl
//!
//! This module loads a TOML crawl configuration and resolves it into a
//! [`CrawlConfig`]. The `[default-init]` table must hold exactly `region`,
//! `split` and `week`; every other table contributes optional keys
//! (`base-url`, `year`, `flag`).
//!
//! # Example
//!
//! ```no_run
//! use riftcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling {} {}", config.region, config.split);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlConfig, Region, Split, WeekSpec};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{resolve_week, DEFAULT_INIT};
