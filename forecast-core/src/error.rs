use reqwest::StatusCode;
use thiserror::Error;

/// Why a fetch produced no forecast.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: connect, DNS, timeout, or reading the body.
    #[error("Request to weather provider failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather provider answered with status {status}: {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Weather provider response is malformed: {0}")]
    Malformed(String),

    /// Well-formed response without any resolved location.
    #[error("Weather provider resolved no location")]
    NotFound,

    #[error("Weather provider returned no days for '{location}'")]
    NoDays { location: String },
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
