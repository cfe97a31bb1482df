use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use crate::config::FIXED_COLUMNS;
use crate::tally::Municipalities;
use crate::Result;

/// Header plus one row per municipality, every field already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lays the municipalities out as a table.
/// Party columns are the sorted union of all parties seen anywhere, a municipality without
/// votes for a party gets "0" in its column, same as a party that got zero votes.
pub fn encode_table(municipalities: &Municipalities) -> ResultTable {
    let parties: BTreeSet<&str> = municipalities
        .iter()
        .flat_map(|(_, tally)| tally.party_votes.keys().map(String::as_str))
        .collect();

    let header = FIXED_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(parties.iter().map(|party| party.to_string()))
        .collect();

    let rows = municipalities
        .iter()
        .map(|(code, tally)| {
            let mut row = Vec::with_capacity(FIXED_COLUMNS.len() + parties.len());
            row.push(code.to_string());
            row.push(tally.name.clone());
            row.push(tally.voters.to_string());
            row.push(tally.envelopes.to_string());
            row.push(tally.valid_votes.to_string());
            row.extend(
                parties
                    .iter()
                    .map(|party| tally.party_votes.get(*party).copied().unwrap_or(0).to_string()),
            );
            row
        })
        .collect();

    ResultTable { header, rows }
}

/// Writes the table as comma separated UTF-8, records end with CRLF.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(&table.header)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes the table into it.
pub fn write_csv_file(table: &ResultTable, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}
