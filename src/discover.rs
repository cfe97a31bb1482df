use scraper::{Html, Selector};

use crate::{Error, Result};

/// Returns absolute URLs of every `<a href>` in the page whose target contains `{marker}=`.
/// The order follows the document, duplicates are kept.
/// An empty result is a valid answer, on a municipality page it means there are no precincts.
pub fn discover_links(html: &str, base_url: &str, marker: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let link_selector = create_selector("a[href]")?;
    let needle = format!("{marker}=");

    let links = doc
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(&needle))
        .map(|href| format!("{base_url}{href}"))
        .collect();
    Ok(links)
}

/// Extracts the municipality code: the raw text after the first `{marker}=` up to the next `&`.
/// Nothing is percent-decoded, the code is used as it appears in the link.
pub fn municipality_code(link: &str, marker: &str) -> Result<String> {
    let needle = format!("{marker}=");
    link.split_once(&needle)
        .and_then(|(_, rest)| rest.split('&').next())
        .map(str::to_string)
        .ok_or_else(|| Error::MissingCode {
            link: link.into(),
            marker: marker.into(),
        })
}

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseInvalidSelector(sel_str.into()))
}
