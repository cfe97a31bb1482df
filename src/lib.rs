//! Election results scraper.
//!
//! Walks the territory -> municipality -> precinct hierarchy of the results site,
//! extracts the tallies from each result page, sums precincts up to their municipality
//! and writes one CSV row per municipality.

mod error;
mod macros;

pub mod cli;
pub mod config;
pub mod discover;
pub mod encode;
pub mod parse;
pub mod process;
pub mod request;
pub mod tally;

pub use error::{Error, Result};

/// Prefix of every child link on the results site, links in the pages are relative to it.
const BASE_URL: &str = "https://www.volby.cz/pls/ps2021/";
const MUNICIPALITY_MARKER: &str = "xobec";
const PRECINCT_MARKER: &str = "xokrsek";
/// Precinct pages of a single municipality requested at the same time.
const DEFAULT_CONCURRENCY: usize = 8;
