//! Integration tests against mock lolesports and stats API servers

mod common;
mod crawl_tests;
mod fetch_tests;
