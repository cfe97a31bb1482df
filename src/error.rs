use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseInvalidSelector(String),
    #[error("Required field is missing from the page: {0}")]
    MissingField(&'static str),
    #[error("Link has no municipality code after `{marker}=`: {link}")]
    MissingCode { link: String, marker: String },
    #[error("Cannot combine an empty list of precinct results.")]
    EmptyAggregate,
    #[error("Vote count overflow while combining precincts of {0}")]
    CountOverflow(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("Concurrency limiter was closed before all pages were requested.")]
    RuntimeSemaphoreClosed,

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<tokio::sync::AcquireError> for Error {
    fn from(_value: tokio::sync::AcquireError) -> Self {
        Error::RuntimeSemaphoreClosed
    }
}
