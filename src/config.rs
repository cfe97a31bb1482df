//! Everything that ties the scraper to the layout of the results site.
//!
//! The site has no published schema, so the identifiers below are the whole contract.
//! When the layout changes this is the only file that should need editing.

use tokio::sync::Semaphore;

use crate::{BASE_URL, DEFAULT_CONCURRENCY, MUNICIPALITY_MARKER, PRECINCT_MARKER};

/// Text in the `<h3>` heading in front of the municipality name.
pub const NAME_LABEL: &str = "Obec:";
pub const NAME_HEADING: &str = "h3";

/// Tables holding the per party results.
pub const RESULT_TABLE: &str = "table.table";
pub const RESULT_ROW: &str = "tr";
pub const RESULT_CELL: &str = "td";
/// Attribute that carries the column identifier of a cell.
pub const CELL_ID_ATTR: &str = "headers";

/// The numeric summary fields of a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Voters,
    Envelopes,
    ValidVotes,
}

/// Summary field -> selector of the cell holding it.
/// `headers` is a space separated list of ids, so the selectors match single tokens.
pub const SUMMARY_CELLS: [(Field, &str); 3] = [
    (Field::Voters, r#"td[headers~="sa2"]"#),
    (Field::Envelopes, r#"td[headers~="sa3"][data-rel="L1"]"#),
    (Field::ValidVotes, r#"td[headers~="sa6"]"#),
];

/// The results are split into two sub-tables (`t1`, `t2`), each with its own suffixes.
/// A cell matches when any of its `headers` ids ends with one of them.
pub const PARTY_NAME_SUFFIXES: [&str; 2] = ["t1sb2", "t2sb2"];
pub const PARTY_VOTES_SUFFIXES: [&str; 2] = ["t1sb3", "t2sb3"];

/// Output column names in front of the party columns.
pub const FIXED_COLUMNS: [&str; 5] = [
    "Kód obce",
    "Název obce",
    "Voliči",
    "Vydané obálky",
    "Platné hlasy",
];

/// Where to find child pages and how hard to hit the site.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Prepended to every relative link found on a page.
    pub base_url: String,
    /// Query parameter that marks links to municipality pages.
    pub municipality_marker: String,
    /// Query parameter that marks links to precinct pages.
    pub precinct_marker: String,
    /// Max precinct pages in flight at once, kept within `1..=Semaphore::MAX_PERMITS`.
    pub concurrency: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.into(),
            municipality_marker: MUNICIPALITY_MARKER.into(),
            precinct_marker: PRECINCT_MARKER.into(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ScrapeConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, Semaphore::MAX_PERMITS);
        self
    }
}
