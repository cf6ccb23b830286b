use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the client library.
///
/// Service-level failures are not represented here: when the service
/// answers with `success: false` (at any HTTP status), the call still
/// returns `Ok` and the failure lives in the response's success/message
/// fields. This enum covers everything that prevents a decodable answer
/// from coming back at all.
#[derive(Debug, Error)]
pub enum Error {
    /// The request was incomplete or contradictory. Raised before any
    /// network I/O happens.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The base API URL is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connectivity failure: DNS, connection refused, timeout. HTTP-level
    /// error statuses are not transport errors.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON where JSON was expected.
    #[error("failed to decode response: {source}; body was: {body}")]
    Decode {
        source: serde_json::Error,
        body: String,
    },

    /// Local file I/O failure: missing audio file on upload, unwritable
    /// destination on download.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
