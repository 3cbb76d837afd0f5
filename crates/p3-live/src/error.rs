//! Live routing error types.

use thiserror::Error;

/// Hard failures of the router. Everything else resolves to "no result".
#[derive(Debug, Error)]
pub enum LiveError {
    /// The caller broke the call contract (e.g. passed both a track and an
    /// event).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors fetching oEmbed metadata from the video host.
#[derive(Debug, Error)]
pub enum OEmbedError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The video host returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the host.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The video host returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body was not valid oEmbed JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response had no `html` field.
    #[error("oEmbed response has no embeddable html")]
    MissingHtml,
}
