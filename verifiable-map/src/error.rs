use thiserror::Error;

/// Errors from verifiable map and log operations.
#[derive(Debug, Error)]
pub enum Error {
    // Transport errors
    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Failure reported by a non-HTTP [`crate::Transport`], passed through
    /// unchanged.
    #[error("transport error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The server rejected the requested range or tree size (400).
    #[error("invalid range requested")]
    InvalidRange,
    /// The credentials do not grant access (403).
    #[error("not authorized")]
    NotAuthorized,
    /// The map, log or entry does not exist (404).
    #[error("object not found")]
    NotFound,
    /// The object already exists or conflicts with the request (409).
    #[error("object conflict")]
    ObjectConflict,
    /// Any other unsuccessful status.
    #[error("unexpected response status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, decoded lossily.
        message: String,
    },

    // Decode errors
    /// A response body is not the expected JSON.
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    /// A hash is not valid hex.
    #[error("malformed hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// A header holds something other than a decimal integer where one is
    /// expected.
    #[error("malformed integer in header {header}: {value:?}")]
    InvalidHeaderInteger {
        /// Header name.
        header: &'static str,
        /// Offending text.
        value: String,
    },
    /// A header value is not visible ascii.
    #[error("header {0} is not valid visible ascii")]
    InvalidHeaderValue(&'static str),
    /// An entry body does not match its format.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    // Protocol contract violations
    /// A header the protocol requires is absent.
    #[error("missing required response header {0}")]
    MissingHeader(&'static str),

    /// Client settings cannot address a server.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Wrap a failure from a custom transport.
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Other(error.into())
    }
}

/// Alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
