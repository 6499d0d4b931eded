use crate::{JsonFetchError, Result};

/// Base URL and retry bound shared by every request of a client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    max_retries: u32,
}

impl ClientConfig {
    /// Validates and creates a config.
    ///
    /// `max_retries` is the number of retries after the initial attempt, so
    /// a request is tried at most `max_retries + 1` times. Negative values and
    /// an empty `base_url` are rejected.
    pub fn new(base_url: impl Into<String>, max_retries: i64) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(JsonFetchError::Config("base URL cannot be empty".to_owned()));
        }
        if max_retries < 0 {
            return Err(JsonFetchError::Config("retries cannot be negative".to_owned()));
        }
        let max_retries = u32::try_from(max_retries).map_err(|_| {
            JsonFetchError::Config(format!("retries out of range: {max_retries}"))
        })?;
        Ok(Self {
            base_url,
            max_retries,
        })
    }

    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `JSONFETCH_BASE_URL`: base URL every path is appended to
    /// - `JSONFETCH_MAX_RETRIES`: optional retry count, defaults to `0`
    ///
    /// **Not available on `wasm32` targets**, environment variables do not
    /// exist in browser runtimes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("JSONFETCH_BASE_URL").map_err(|_| {
            JsonFetchError::Config("missing JSONFETCH_BASE_URL environment variable".to_owned())
        })?;
        let max_retries = match std::env::var("JSONFETCH_MAX_RETRIES") {
            Ok(raw) => raw.trim().parse::<i64>().map_err(|err| {
                JsonFetchError::Config(format!("invalid JSONFETCH_MAX_RETRIES '{raw}': {err}"))
            })?,
            Err(_) => 0,
        };
        Self::new(base_url, max_retries)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retries allowed after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
