//! Command line surface of the scraper.

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::Semaphore;

use crate::config::ScrapeConfig;
use crate::{Error, Result, DEFAULT_CONCURRENCY};

const URL_SCHEME: &str = "https://";
const OUTPUT_EXTENSION: &str = ".csv";

/// Downloads the 2021 Chamber of Deputies election results of one territorial unit and
/// stores them per municipality in a CSV file.
#[derive(Debug, Parser)]
#[command(name = "volby_scrap", version, long_about = None)]
pub struct Args {
    /// URL of the results page of one territorial unit (must start with https://).
    pub url: String,

    /// Path of the output CSV file including its name (must end with .csv).
    pub output: PathBuf,

    /// How many precinct pages may be requested at the same time.
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

impl Args {
    /// Checks the arguments before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() || self.output.as_os_str().is_empty() {
            return Err(Error::InvalidArgument(
                "both the source URL and the output file path are required".into(),
            ));
        }
        if !self.url.starts_with(URL_SCHEME) {
            return Err(Error::InvalidArgument(format!(
                "the first argument must be a URL starting with '{URL_SCHEME}', got '{}'",
                self.url
            )));
        }
        if !self.output.to_string_lossy().ends_with(OUTPUT_EXTENSION) {
            return Err(Error::InvalidArgument(format!(
                "the second argument must be a file path ending with '{OUTPUT_EXTENSION}', got '{}'",
                self.output.display()
            )));
        }
        if self.concurrency == 0 || self.concurrency > Semaphore::MAX_PERMITS {
            return Err(Error::InvalidArgument(format!(
                "concurrency must be between 1 and {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }

    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig::default().with_concurrency(self.concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.volby.cz/pls/ps2021/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("volby_scrap").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn accepts_https_url_and_csv_path() {
        let args = args(&[URL, "out/benesov.csv"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(args.scrape_config().concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn rejects_plain_http() {
        let args = args(&["http://www.volby.cz/pls/ps2021/ps32", "out.csv"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_other_extensions() {
        let args = args(&[URL, "out.txt"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_zero_concurrency() {
        let args = args(&[URL, "out.csv", "--concurrency", "0"]);
        assert!(matches!(args.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn rejects_concurrency_above_the_permit_limit() {
        let too_many = (Semaphore::MAX_PERMITS + 1).to_string();
        let rejected = args(&[URL, "out.csv", "--concurrency", too_many.as_str()]);
        assert!(matches!(rejected.validate(), Err(Error::InvalidArgument(_))));

        let max = Semaphore::MAX_PERMITS.to_string();
        assert!(args(&[URL, "out.csv", "-c", max.as_str()]).validate().is_ok());
    }

    #[test]
    fn missing_output_is_a_parse_error() {
        assert!(Args::try_parse_from(["volby_scrap", URL]).is_err());
    }
}
