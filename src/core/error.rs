use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EsgError {
    /// An error occurred during an HTTP request to the narrative service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A document was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A JSON document could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV input of the offline pipeline could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A dataset file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An external quartile label was not one of `Q1`..`Q4` and the strict label policy is active.
    #[error("unrecognized quartile label: {0:?}")]
    UnknownQuartile(String),

    /// A caller-supplied parameter was out of range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// No credential is configured for the narrative service.
    #[error("no credential configured for the narrative service")]
    MissingCredential,
}
