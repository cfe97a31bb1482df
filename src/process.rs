use std::path::Path;

use chrono::Local;
use reqwest::Client;

use crate::config::ScrapeConfig;
use crate::discover::{discover_links, municipality_code};
use crate::encode::{encode_table, write_csv_file};
use crate::parse::parse_tally_async;
use crate::request::{request_page_html, request_precincts};
use crate::tally::{combine, Municipalities, Tally};
use crate::{info_time, Result};

/// Scrapes the whole territory: every municipality linked from `territory_url`, summed up
/// from its precincts where it has any.
/// Municipalities are processed one after another in the order they are linked.
/// Any failed request or unparsable page aborts the run.
pub async fn process_territory(
    client: &Client,
    territory_url: &str,
    config: &ScrapeConfig,
) -> Result<Municipalities> {
    let start_time = Local::now();
    info_time!("Started scraping {territory_url}");

    let territory_html = request_page_html(client, territory_url).await?;
    let municipality_links =
        discover_links(&territory_html, &config.base_url, &config.municipality_marker)?;
    info_time!("Found {} municipalities to process.", municipality_links.len());

    let mut municipalities = Municipalities::new();
    for link in &municipality_links {
        info_time!("Processing: {link}");
        let code = municipality_code(link, &config.municipality_marker)?;
        let tally = process_municipality(client, link, config).await?;
        if municipalities.insert(code.clone(), tally).is_some() {
            info_time!("Municipality {code} listed again, keeping the later result.");
        }
    }

    info_time!(
        start_time,
        "Finished PROCESSING {} municipalities.",
        municipalities.len()
    );
    Ok(municipalities)
}

/// Scrapes the territory and writes the table to `output`.
/// The file is only created once every page was scraped, a failed run leaves nothing behind.
/// Returns the number of municipality rows written.
pub async fn scrape_to_csv(
    client: &Client,
    territory_url: &str,
    config: &ScrapeConfig,
    output: &Path,
) -> Result<usize> {
    let municipalities = process_territory(client, territory_url, config).await?;

    let table = encode_table(&municipalities);
    write_csv_file(&table, output)?;
    Ok(table.rows.len())
}

async fn process_municipality(client: &Client, link: &str, config: &ScrapeConfig) -> Result<Tally> {
    let html = request_page_html(client, link).await?;
    let precinct_links = discover_links(&html, &config.base_url, &config.precinct_marker)?;

    if precinct_links.is_empty() {
        info_time!("Municipality without precincts: {link}");
        return parse_tally_async(html).await;
    }

    info_time!(
        "Municipality with {} precincts: {link}",
        precinct_links.len()
    );
    let precincts = request_precincts(client, &precinct_links, config.concurrency).await?;
    combine(&precincts)
}
