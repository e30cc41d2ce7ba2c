//! Output module for merged match records and run summaries
//!
//! This module handles:
//! - The [`Persister`] interface the JSON fetcher writes through
//! - Appending records to JSON files on disk
//! - Summarising a complete harvest

mod json_file;
mod summary;
mod traits;

pub use json_file::JsonFilePersister;
pub use summary::{print_summary, HarvestSummary};
pub use traits::{OutputError, OutputResult, Persister};
