/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum JsonFetchError {
    /// Invalid client configuration, e.g. a negative retry count.
    #[error("configuration error: {0}")]
    Config(String),
    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
    /// Non-success HTTP status code, with the response body when it was JSON.
    #[error("HTTP error: {status}")]
    Http {
        status: u16,
        body: Option<serde_json::Value>,
    },
    /// Success status but the body could not be decoded into the target type.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request body could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    /// Caller-supplied header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    /// The retry loop ended without producing a result.
    #[error("retry limit exceeded after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
}

impl JsonFetchError {
    /// HTTP status of an [`JsonFetchError::Http`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
