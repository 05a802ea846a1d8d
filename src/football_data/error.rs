use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to football-data.org.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {url} has no `{field}` array")]
    MissingField { url: String, field: &'static str },
}

impl UpstreamError {
    /// The payload arrived but lacked the array we need.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, UpstreamError::MissingField { .. })
    }
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
