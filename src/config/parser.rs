use crate::config::types::CrawlConfig;
use crate::config::validation::validate;
use crate::{ConfigError, HarvestError};
use sha2::{Digest, Sha256};
use std::path::Path;
use toml::Table;

/// Loads and resolves a crawl configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(HarvestError)` - Failed to load, parse, or validate the configuration,
///   or the `week` value could not be resolved
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use riftcrawl::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Crawling region: {}", config.region);
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, HarvestError> {
    let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
    parse_config(&content)
}

/// Parses and resolves configuration from TOML text
pub fn parse_config(content: &str) -> Result<CrawlConfig, HarvestError> {
    let document: Table = toml::from_str(content).map_err(ConfigError::from)?;
    validate(&document)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so that a set of downloaded games can be traced back to
/// the configuration that produced it.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(CrawlConfig, String), HarvestError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
