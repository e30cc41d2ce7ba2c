//! Persister trait and error types
//!
//! This module defines the interface merged match records are written
//! through, so the fetcher does not care where records end up.

use crate::matches::MergedMatchRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for merged-record sinks
///
/// Implementations must be thread-safe; the fetcher holds a shared reference
/// across requests.
pub trait Persister: Send + Sync {
    /// Stores one merged record
    ///
    /// # Arguments
    ///
    /// * `file_name` - Name derived from the game URL, e.g. `game_TRLH1_1002440062.json`
    /// * `record` - The merged game and timeline object
    fn persist(&self, file_name: &str, record: &MergedMatchRecord) -> OutputResult<()>;
}
