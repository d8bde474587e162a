use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("{url} did not respond within {budget:?}")]
    Timeout { url: String, budget: Duration },

    #[error("Extraction panicked for {url}")]
    Panicked { url: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
