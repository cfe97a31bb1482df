use scraper::{ElementRef, Html};
use tokio::task::spawn_blocking;

use crate::config::{
    Field, CELL_ID_ATTR, NAME_HEADING, NAME_LABEL, PARTY_NAME_SUFFIXES, PARTY_VOTES_SUFFIXES,
    RESULT_CELL, RESULT_ROW, RESULT_TABLE, SUMMARY_CELLS,
};
use crate::discover::create_selector;
use crate::tally::Tally;
use crate::{warn_time, Error, Result};

/// Parses the page on a blocking thread, `Html` can't be held across awaits.
pub async fn parse_tally_async(html: String) -> Result<Tally> {
    spawn_blocking(move || parse_tally(&html)).await?
}

/// Parses a municipality or precinct result page, both share the same layout.
///
/// Fails only when the municipality name heading is missing. Numeric cells that are missing
/// or don't hold a number count as zero.
pub fn parse_tally(html: &str) -> Result<Tally> {
    let doc = Html::parse_document(html);

    let mut tally = Tally {
        name: parse_name(&doc)?,
        ..Default::default()
    };

    for (field, sel_str) in SUMMARY_CELLS {
        let selector = create_selector(sel_str)?;
        let value = match doc.select(&selector).next() {
            Some(cell) => normalize_number(&cell_text(cell)),
            None => {
                warn_time!("'{}': no cell for {:?}, using 0", tally.name, field);
                0
            }
        };
        match field {
            Field::Voters => tally.voters = value,
            Field::Envelopes => tally.envelopes = value,
            Field::ValidVotes => tally.valid_votes = value,
        }
    }

    let table_selector = create_selector(RESULT_TABLE)?;
    let row_selector = create_selector(RESULT_ROW)?;
    let cell_selector = create_selector(RESULT_CELL)?;
    for table in doc.select(&table_selector) {
        for row in table.select(&row_selector) {
            let find_cell = |suffixes: &[&str]| {
                row.select(&cell_selector).find(|td| {
                    td.value()
                        .attr(CELL_ID_ATTR)
                        .is_some_and(|ids| has_id_suffix(ids, suffixes))
                })
            };
            let (Some(name_cell), Some(votes_cell)) = (
                find_cell(&PARTY_NAME_SUFFIXES[..]),
                find_cell(&PARTY_VOTES_SUFFIXES[..]),
            ) else {
                continue;
            };
            // Later rows for the same party win.
            tally.party_votes.insert(
                cell_text(name_cell).trim().to_string(),
                normalize_number(&cell_text(votes_cell)),
            );
        }
    }

    Ok(tally)
}

fn parse_name(doc: &Html) -> Result<String> {
    let heading_selector = create_selector(NAME_HEADING)?;
    doc.select(&heading_selector)
        .map(cell_text)
        .find(|text| text.contains(NAME_LABEL))
        .map(|text| text.replace(NAME_LABEL, "").trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(Error::MissingField("municipality name"))
}

fn has_id_suffix(ids: &str, suffixes: &[&str]) -> bool {
    ids.split_whitespace()
        .any(|id| suffixes.iter().any(|s| id.ends_with(*s)))
}

#[inline]
fn cell_text(el: ElementRef) -> String {
    el.text().collect()
}

/// Turns a table number into an integer. Thousands are separated by (non-breaking) spaces,
/// anything that isn't a plain run of digits afterwards (`-`, `–`, empty cell) becomes 0.
/// Digit runs too long for a `u64` saturate at `u64::MAX`.
pub fn normalize_number(text: &str) -> u64 {
    let cleaned = text.replace(['\u{a0}', ' '], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    // Only digits are left, so the only possible parse failure is overflow.
    cleaned.parse().unwrap_or(u64::MAX)
}
