//! Error types for the store page parsing pipeline.

/// Failures produced while parsing a storefront page.
///
/// Every variant aborts the parse. Individual malformed products are
/// skipped during normalization and never surface here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No URL was supplied.
    #[error("store url is required")]
    MissingUrl,

    /// The input is not a hosted storefront URL.
    #[error("invalid store url: {0}")]
    InvalidUrlFormat(String),

    /// The GET request failed: network error, timeout, oversized body, or a
    /// non-success status from the storefront host.
    #[error("failed to fetch store page: {message}")]
    FetchFailed {
        status: Option<u16>,
        message: String,
    },

    /// The page carries no hydration payload to read the catalog from.
    #[error("no embedded state found in store page")]
    NoEmbeddedStateFound,

    /// The hydration payload exists but does not decode as JSON.
    #[error("embedded state is not valid json: {0}")]
    MalformedEmbeddedState(#[source] serde_json::Error),

    /// The embedded cache decoded but holds no product entries.
    #[error("no products found in store page")]
    NoProductsFound,
}

impl Error {
    /// HTTP status a serving layer should answer with for this failure.
    ///
    /// Upstream non-success statuses pass through on [`Error::FetchFailed`].
    pub fn suggested_status(&self) -> u16 {
        match self {
            Error::MissingUrl | Error::InvalidUrlFormat(_) => 400,
            Error::FetchFailed { status, .. } => status.unwrap_or(500),
            Error::NoEmbeddedStateFound | Error::MalformedEmbeddedState(_) => 500,
            Error::NoProductsFound => 404,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::FetchFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
