use std::sync::Arc;

use reqwest::Client;
use tokio::{sync::Semaphore, task::JoinSet};

use crate::parse::parse_tally_async;
use crate::tally::Tally;
use crate::{info_time, Result};

/// Requests a page and returns a `Result<String>` containing the HTML.
/// Non-success status codes are errors.
pub async fn request_page_html(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?.error_for_status()?;
    let html = res.text().await?;
    Ok(html)
}

/// Requests and parses all the precinct pages, at most `concurrency` at a time
/// (clamped to what a tokio semaphore can hold).
/// The tallies come back in the order of `urls`, regardless of which page arrived first.
/// The first failure aborts the remaining requests.
pub async fn request_precincts(
    client: &Client,
    urls: &[String],
    concurrency: usize,
) -> Result<Vec<Tally>> {
    let limiter = Arc::new(Semaphore::new(concurrency.clamp(1, Semaphore::MAX_PERMITS)));
    let mut task_set = JoinSet::new();

    for (idx, url) in urls.iter().enumerate() {
        task_set.spawn({
            // Client uses Arc so we can clone cheaply
            let client = client.clone();
            let limiter = limiter.clone();
            let url = url.clone();

            async move {
                let _permit = limiter.acquire_owned().await?;
                info_time!("Requesting precinct: {url}");
                let html = request_page_html(&client, &url).await?;
                let tally = parse_tally_async(html).await?;
                Ok::<_, crate::Error>((idx, tally))
            }
        });
    }

    let mut slots: Vec<Option<Tally>> = vec![None; urls.len()];
    while let Some(task) = task_set.join_next().await {
        // Dropping the set on error aborts the tasks still running.
        let (idx, tally) = task??;
        slots[idx] = Some(tally);
    }

    Ok(slots.into_iter().flatten().collect())
}
