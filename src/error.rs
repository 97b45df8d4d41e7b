//! Error types for rs-mdclean.
//!
//! The boundary detector itself never fails; these errors come from the
//! surrounding pipeline (empty input, file I/O, URL validation) and from the
//! optional translation client.

/// Error type for conversion and translation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the HTML nor the crawler Markdown contained anything to clean.
    #[error("No extractable content found")]
    NoContent,

    /// The source URL is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing an output or log file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure talking to the translation provider.
    #[cfg(feature = "translate")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The translation provider answered with a non-success status.
    #[cfg(feature = "translate")]
    #[error("API returned error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// First 200 characters of the response body.
        body: String,
    },

    /// The provider requires an API key and none was configured.
    #[cfg(feature = "translate")]
    #[error("API key is required for {0}")]
    MissingApiKey(&'static str),

    /// The provider answered 2xx but the payload had no translated text.
    #[cfg(feature = "translate")]
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Every attempt for one chunk failed.
    #[cfg(feature = "translate")]
    #[error("Failed to translate chunk {chunk}/{total} after {attempts} attempts: {source}")]
    Translation {
        /// 1-based chunk number.
        chunk: usize,
        /// Total number of chunks.
        total: usize,
        /// Attempts made.
        attempts: usize,
        /// Last error observed.
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
