use thiserror::Error;

/// Why an enrichment attempt produced no narrative.
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("enrichment is disabled")]
    Disabled,

    #[error("request failed: {0}")]
    Request(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<reqwest::Error> for EnrichError {
    fn from(e: reqwest::Error) -> Self {
        EnrichError::Request(e.to_string())
    }
}
